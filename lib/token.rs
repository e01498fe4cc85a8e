use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Ident(String),
    Int(String),
    Bool(String),
    String(String),
    Illegal(String),
    Nil,

    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Pow,

    Equal,
    NotEqual,
    And,
    Or,
    Not,

    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,

    Let,
    If,
    List,
    Open,
    WriteLn,

    Lparen,
    Rparen,
    Lbracket,
    Rbracket,

    Eol,
    Eof,
}

impl Token {
    pub fn variant_eq(&self, other: &Token) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Operators and keywords that may only appear right after an opening paren.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::Add
                | Token::Subtract
                | Token::Multiply
                | Token::Divide
                | Token::Modulo
                | Token::Pow
                | Token::Equal
                | Token::NotEqual
                | Token::And
                | Token::Or
                | Token::Not
                | Token::GreaterThan
                | Token::GreaterThanEqual
                | Token::LessThan
                | Token::LessThanEqual
                | Token::Let
                | Token::If
                | Token::List
                | Token::Open
                | Token::WriteLn
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Ident(value) => write!(f, "{}", value),
            Token::Int(value) => write!(f, "{}", value),
            Token::Bool(value) => write!(f, "{}", value),
            Token::String(value) => write!(f, "{}", value),
            Token::Illegal(value) => write!(f, "{}", value),
            Token::Nil => write!(f, "nil"),

            Token::Add => write!(f, "+"),
            Token::Subtract => write!(f, "-"),
            Token::Multiply => write!(f, "*"),
            Token::Divide => write!(f, "/"),
            Token::Modulo => write!(f, "%"),
            Token::Pow => write!(f, "^"),

            Token::Equal => write!(f, "="),
            Token::NotEqual => write!(f, "not="),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Not => write!(f, "not"),

            Token::GreaterThan => write!(f, ">"),
            Token::GreaterThanEqual => write!(f, ">="),
            Token::LessThan => write!(f, "<"),
            Token::LessThanEqual => write!(f, "<="),

            Token::Let => write!(f, "let"),
            Token::If => write!(f, "if"),
            Token::List => write!(f, "list"),
            Token::Open => write!(f, "open"),
            Token::WriteLn => write!(f, "writeln"),

            Token::Lparen => write!(f, "("),
            Token::Rparen => write!(f, ")"),
            Token::Lbracket => write!(f, "["),
            Token::Rbracket => write!(f, "]"),

            Token::Eol | Token::Eof => Ok(()),
        }
    }
}
