use anyhow::{anyhow, bail, Error, Result};

use crate::{
    ast::{Expression, Operator, Program},
    lexer::Lexer,
    token::Token,
};

/// Recursive-descent parser over a two-token window.
///
/// Every form opens with `(` and is identified by the token after it, so the
/// construct parsers are chosen by looking at `peek_token` while `cur_token`
/// still sits on the opening paren. Each construct parser leaves `cur_token` on
/// the last token it consumed.
///
/// Parsing is fail-fast: the first structural error stops the whole program and
/// is recorded in [`Parser::errors`].
pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    cur_position: usize,
    peek_position: usize,
    errors: Vec<String>,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        let mut parser = Self {
            lexer,
            cur_token: Token::Eof,
            peek_token: Token::Eof,
            cur_position: 0,
            peek_position: 0,
            errors: Vec::new(),
        };
        parser.next_token().next_token();
        parser
    }

    pub fn parse_program(&mut self) -> Program {
        let mut expressions: Vec<Expression> = Vec::new();
        while !self.cur_token_is(&Token::Eof) {
            match self.parse_expression() {
                Ok(expression) => expressions.push(expression),
                Err(err) => {
                    self.errors.push(err.to_string());
                    break;
                }
            }
            self.next_token();
        }
        if expressions.is_empty() && self.errors.is_empty() {
            self.errors.push("no expression given.".to_string());
        }
        Program { expressions }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn cur_token_is(&self, token: &Token) -> bool {
        self.cur_token.variant_eq(token)
    }

    fn peek_token_is(&self, token: &Token) -> bool {
        self.peek_token.variant_eq(token)
    }

    /// Line breaks only matter to line-oriented callers, so they never reach the
    /// construct parsers.
    fn next_token(&mut self) -> &mut Self {
        self.cur_token = std::mem::replace(&mut self.peek_token, Token::Eof);
        self.cur_position = self.peek_position;
        self.peek_token = loop {
            let token = self.lexer.next_token();
            if token != Token::Eol {
                break token;
            }
        };
        self.peek_position = self.lexer.position();
        self
    }

    fn expect_peek(&mut self, expected: Token) -> Result<()> {
        if self.peek_token_is(&expected) {
            self.next_token();
            return Ok(());
        }
        match &self.peek_token {
            Token::Eof | Token::Illegal(_) => {
                Err(self.unexpected_token(&self.peek_token, self.peek_position))
            }
            token => bail!(
                "expected next token to be '{expected}', found '{token}' at character {}",
                self.peek_position
            ),
        }
    }

    fn unexpected_token(&self, token: &Token, position: usize) -> Error {
        match token {
            Token::Eof => anyhow!("unexpected end of input at character {position}"),
            Token::Illegal(char) => anyhow!("illegal character '{char}' at character {position}"),
            token if token.is_operator() => anyhow!(
                "unexpected operator '{token}' at character {position}, operators must directly follow '('"
            ),
            token => anyhow!("unexpected '{token}' at character {position}"),
        }
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        match self.cur_token.clone() {
            Token::Int(literal) => self.parse_integer_literal(&literal),
            Token::Bool(literal) => self.parse_boolean_literal(&literal),
            Token::String(value) => Ok(Expression::String(value)),
            Token::Nil => Ok(Expression::Nil),
            Token::Ident(name) => Ok(Expression::Identifier(name)),
            Token::Lparen => self.parse_form(),
            token => Err(self.unexpected_token(&token, self.cur_position)),
        }
    }

    fn parse_integer_literal(&mut self, literal: &str) -> Result<Expression> {
        let value = literal.parse::<i64>().map_err(|err| {
            anyhow!(
                "could not parse integer literal '{literal}' at character {}: {err}",
                self.cur_position
            )
        })?;
        Ok(Expression::Integer(value))
    }

    fn parse_boolean_literal(&mut self, literal: &str) -> Result<Expression> {
        let value = literal.parse::<bool>().map_err(|err| {
            anyhow!(
                "could not parse boolean literal '{literal}' at character {}: {err}",
                self.cur_position
            )
        })?;
        Ok(Expression::Boolean(value))
    }

    fn parse_form(&mut self) -> Result<Expression> {
        if let Some(operator) = Operator::from_token(&self.peek_token) {
            self.next_token();
            return self.parse_operation(operator);
        }

        match self.peek_token.clone() {
            Token::Not => {
                self.next_token();
                self.parse_not()
            }
            Token::Let => {
                self.next_token();
                self.parse_let()
            }
            Token::If => {
                self.next_token();
                self.parse_if()
            }
            Token::List => {
                self.next_token();
                Ok(Expression::List(self.parse_expression_list()?))
            }
            Token::WriteLn => {
                self.next_token();
                Ok(Expression::WriteLn(self.parse_expression_list()?))
            }
            Token::Open => {
                self.next_token();
                Ok(Expression::Open(self.parse_expression_list()?))
            }
            Token::Ident(function) => {
                self.next_token();
                let arguments = self.parse_expression_list()?;
                Ok(Expression::Call {
                    function,
                    arguments,
                })
            }
            Token::Rparen => bail!("empty expression '()' at character {}", self.cur_position),
            _ => self.parse_grouped_expression(),
        }
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression> {
        self.next_token();
        let expression = self.parse_expression()?;
        self.expect_peek(Token::Rparen)?;
        Ok(expression)
    }

    /// Parses expressions up to the closing paren of the current form and
    /// consumes that paren.
    fn parse_expression_list(&mut self) -> Result<Vec<Expression>> {
        let mut expressions: Vec<Expression> = Vec::new();

        while !self.peek_token_is(&Token::Rparen) {
            self.next_token();
            expressions.push(self.parse_expression()?);
        }

        self.next_token();

        Ok(expressions)
    }

    fn parse_leading_operand(&mut self, operator: &str) -> Result<Expression> {
        if self.peek_token_is(&Token::Rparen) {
            bail!("missing at least one expression for operation '{operator}'");
        }
        self.next_token();
        self.parse_expression()
    }

    fn parse_operation(&mut self, operator: Operator) -> Result<Expression> {
        let mut operands = vec![self.parse_leading_operand(&operator.to_string())?];
        operands.extend(self.parse_expression_list()?);

        if operator == Operator::Subtract && operands.len() == 1 {
            if let Some(operand) = operands.pop() {
                return Ok(Expression::Negate(Box::new(operand)));
            }
        }

        Ok(Expression::Operation { operator, operands })
    }

    fn parse_not(&mut self) -> Result<Expression> {
        let operand = self.parse_leading_operand("not")?;

        if !self.peek_token_is(&Token::Rparen) {
            bail!("'not' operation either contains more than one expression or lacks a closing parenthesis");
        }
        self.next_token();

        Ok(Expression::Not(Box::new(operand)))
    }

    fn parse_let(&mut self) -> Result<Expression> {
        let name = match self.peek_token.clone() {
            Token::Ident(name) => {
                self.next_token();
                name
            }
            token @ (Token::Eof | Token::Illegal(_)) => {
                return Err(self.unexpected_token(&token, self.peek_position))
            }
            token => bail!(
                "expected an identifier after 'let', found '{token}' at character {}",
                self.peek_position
            ),
        };

        let parameters = if self.peek_token_is(&Token::Lbracket) {
            self.next_token();
            Some(self.parse_parameters()?)
        } else {
            None
        };

        let body = self.parse_expression_list()?;
        if body.is_empty() {
            bail!("missing body for 'let' binding '{name}'");
        }

        Ok(Expression::Let {
            name,
            parameters,
            body,
        })
    }

    fn parse_parameters(&mut self) -> Result<Vec<String>> {
        let mut parameters: Vec<String> = Vec::new();

        loop {
            self.next_token();
            match self.cur_token.clone() {
                Token::Ident(name) => parameters.push(name),
                Token::Rbracket => return Ok(parameters),
                token @ (Token::Eof | Token::Illegal(_)) => {
                    return Err(self.unexpected_token(&token, self.cur_position))
                }
                token => bail!(
                    "expected an identifier in parameter list, found '{token}' at character {}",
                    self.cur_position
                ),
            }
        }
    }

    fn parse_if(&mut self) -> Result<Expression> {
        if self.peek_token_is(&Token::Rparen) {
            bail!("missing condition for 'if' expression");
        }
        self.next_token();
        let condition = self.parse_expression()?;

        if self.peek_token_is(&Token::Rparen) {
            bail!("missing then-expression for 'if' expression");
        }
        self.next_token();
        let consequence = self.parse_expression()?;

        let alternative = if self.peek_token_is(&Token::Rparen) {
            None
        } else {
            self.next_token();
            Some(Box::new(self.parse_expression()?))
        };

        match self.peek_token.clone() {
            Token::Rparen => {
                self.next_token();
            }
            token @ (Token::Eof | Token::Illegal(_)) => {
                return Err(self.unexpected_token(&token, self.peek_position))
            }
            token => bail!(
                "unexpected '{token}' after else-expression of 'if' at character {}",
                self.peek_position
            ),
        }

        Ok(Expression::If {
            condition: Box::new(condition),
            consequence: Box::new(consequence),
            alternative,
        })
    }
}
