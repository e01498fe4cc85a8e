use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::token::Token;

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, Token> = HashMap::from([
        ("true", Token::Bool("true".to_string())),
        ("false", Token::Bool("false".to_string())),
        ("and", Token::And),
        ("or", Token::Or),
        ("not", Token::Not),
        ("not=", Token::NotEqual),
        ("let", Token::Let),
        ("if", Token::If),
        ("list", Token::List),
        ("open", Token::Open),
        ("nil", Token::Nil),
        ("writeln", Token::WriteLn),
    ]);
}

pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    start: usize,
    char: Option<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let char = chars.first().copied();
        Self {
            chars,
            position: 0,
            start: 0,
            char,
        }
    }

    /// Character index at which the most recently returned token begins.
    pub fn position(&self) -> usize {
        self.start
    }

    pub fn next_token(&mut self) -> Token {
        while self.char.is_some_and(|char| char == ' ' || char == '\t') {
            self.read_char();
        }

        self.start = self.position;

        let token = match self.char {
            Some(char) => match char {
                '+' => Token::Add,
                '-' => Token::Subtract,
                '*' => Token::Multiply,
                '/' => Token::Divide,
                '%' => Token::Modulo,
                '^' => Token::Pow,
                '=' => Token::Equal,
                '>' if self.is_next_char('=') => {
                    self.read_char();
                    Token::GreaterThanEqual
                }
                '>' => Token::GreaterThan,
                '<' if self.is_next_char('=') => {
                    self.read_char();
                    Token::LessThanEqual
                }
                '<' => Token::LessThan,
                '(' => Token::Lparen,
                ')' => Token::Rparen,
                '[' => Token::Lbracket,
                ']' => Token::Rbracket,
                '\n' | '\r' => Token::Eol,
                '"' => {
                    self.read_char();
                    Token::String(self.read_while(|char| char != '"'))
                }
                _ if is_letter(char) => {
                    let literal = self.read_while(|char| {
                        is_letter(char) || char.is_ascii_digit() || matches!(char, '-' | '?' | '=')
                    });
                    return match KEYWORDS.get(literal.as_str()) {
                        Some(keyword) => keyword.clone(),
                        None => Token::Ident(literal),
                    };
                }
                _ if char.is_ascii_digit() => {
                    return Token::Int(self.read_while(|char| char.is_ascii_digit()));
                }
                _ => Token::Illegal(char.to_string()),
            },
            None => return Token::Eof,
        };

        self.read_char();

        token
    }

    fn read_char(&mut self) {
        if self.position < self.chars.len() {
            self.position += 1;
        }
        self.char = self.chars.get(self.position).copied();
    }

    fn is_next_char(&self, ch: char) -> bool {
        self.chars.get(self.position + 1).eq(&Some(&ch))
    }

    /// Consumes characters while `condition` holds, leaving the cursor on the
    /// first character that fails it.
    fn read_while(&mut self, condition: impl Fn(char) -> bool) -> String {
        let mut literal = String::new();
        while let Some(char) = self.char {
            if !condition(char) {
                break;
            }
            literal.push(char);
            self.read_char();
        }
        literal
    }
}

fn is_letter(char: char) -> bool {
    char.is_ascii_alphabetic() || char == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer() {
        let input = r#"(+ 2 3)
                    (- 4 5)
                    (or false true)
                    (and false true)
                    (not false)
                    (not= 1 2)
                    (* (/ 6 3) (% 7 2) (^ 2 8))
                    (>= 3 2) (<= 2 3) (> 3 2) (< 2 3) (= nil nil)
                    (let fact [n] (if (= n 0) 1 (* n (fact (- n 1)))))
                    (list "foo bar" empty? kebab-case x_1)
                    (writeln (open "core"))"#;

        let mut lexer = Lexer::new(input);

        let expected = vec![
            Token::Lparen,
            Token::Add,
            Token::Int("2".to_string()),
            Token::Int("3".to_string()),
            Token::Rparen,
            Token::Eol,
            Token::Lparen,
            Token::Subtract,
            Token::Int("4".to_string()),
            Token::Int("5".to_string()),
            Token::Rparen,
            Token::Eol,
            Token::Lparen,
            Token::Or,
            Token::Bool("false".to_string()),
            Token::Bool("true".to_string()),
            Token::Rparen,
            Token::Eol,
            Token::Lparen,
            Token::And,
            Token::Bool("false".to_string()),
            Token::Bool("true".to_string()),
            Token::Rparen,
            Token::Eol,
            Token::Lparen,
            Token::Not,
            Token::Bool("false".to_string()),
            Token::Rparen,
            Token::Eol,
            Token::Lparen,
            Token::NotEqual,
            Token::Int("1".to_string()),
            Token::Int("2".to_string()),
            Token::Rparen,
            Token::Eol,
            Token::Lparen,
            Token::Multiply,
            Token::Lparen,
            Token::Divide,
            Token::Int("6".to_string()),
            Token::Int("3".to_string()),
            Token::Rparen,
            Token::Lparen,
            Token::Modulo,
            Token::Int("7".to_string()),
            Token::Int("2".to_string()),
            Token::Rparen,
            Token::Lparen,
            Token::Pow,
            Token::Int("2".to_string()),
            Token::Int("8".to_string()),
            Token::Rparen,
            Token::Rparen,
            Token::Eol,
            Token::Lparen,
            Token::GreaterThanEqual,
            Token::Int("3".to_string()),
            Token::Int("2".to_string()),
            Token::Rparen,
            Token::Lparen,
            Token::LessThanEqual,
            Token::Int("2".to_string()),
            Token::Int("3".to_string()),
            Token::Rparen,
            Token::Lparen,
            Token::GreaterThan,
            Token::Int("3".to_string()),
            Token::Int("2".to_string()),
            Token::Rparen,
            Token::Lparen,
            Token::LessThan,
            Token::Int("2".to_string()),
            Token::Int("3".to_string()),
            Token::Rparen,
            Token::Lparen,
            Token::Equal,
            Token::Nil,
            Token::Nil,
            Token::Rparen,
            Token::Eol,
            Token::Lparen,
            Token::Let,
            Token::Ident("fact".to_string()),
            Token::Lbracket,
            Token::Ident("n".to_string()),
            Token::Rbracket,
            Token::Lparen,
            Token::If,
            Token::Lparen,
            Token::Equal,
            Token::Ident("n".to_string()),
            Token::Int("0".to_string()),
            Token::Rparen,
            Token::Int("1".to_string()),
            Token::Lparen,
            Token::Multiply,
            Token::Ident("n".to_string()),
            Token::Lparen,
            Token::Ident("fact".to_string()),
            Token::Lparen,
            Token::Subtract,
            Token::Ident("n".to_string()),
            Token::Int("1".to_string()),
            Token::Rparen,
            Token::Rparen,
            Token::Rparen,
            Token::Rparen,
            Token::Rparen,
            Token::Eol,
            Token::Lparen,
            Token::List,
            Token::String("foo bar".to_string()),
            Token::Ident("empty?".to_string()),
            Token::Ident("kebab-case".to_string()),
            Token::Ident("x_1".to_string()),
            Token::Rparen,
            Token::Eol,
            Token::Lparen,
            Token::WriteLn,
            Token::Lparen,
            Token::Open,
            Token::String("core".to_string()),
            Token::Rparen,
            Token::Rparen,
            Token::Eof,
        ];

        for (i, expected_token) in expected.into_iter().enumerate() {
            let token = lexer.next_token();
            assert_eq!(token, expected_token, "token {i}");
        }
    }

    #[test]
    fn test_eof_is_repeated() {
        let mut lexer = Lexer::new("1");
        assert_eq!(lexer.next_token(), Token::Int("1".to_string()));
        assert_eq!(lexer.next_token(), Token::Eof);
        assert_eq!(lexer.next_token(), Token::Eof);
    }

    #[test]
    fn test_unterminated_string_reads_to_end() {
        let mut lexer = Lexer::new(r#""no closing (+ 1 2)"#);
        assert_eq!(
            lexer.next_token(),
            Token::String("no closing (+ 1 2)".to_string())
        );
        assert_eq!(lexer.next_token(), Token::Eof);
    }

    #[test]
    fn test_illegal_characters() {
        let tests = vec![("$", "$"), ("&", "&"), ("é", "é"), ("{", "{")];

        for (input, expected) in tests {
            let mut lexer = Lexer::new(input);
            assert_eq!(lexer.next_token(), Token::Illegal(expected.to_string()));
        }
    }

    #[test]
    fn test_carriage_return_and_newline_are_eol() {
        let mut lexer = Lexer::new("1\r\n2");
        let tokens: Vec<Token> = (0..5).map(|_| lexer.next_token()).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Int("1".to_string()),
                Token::Eol,
                Token::Eol,
                Token::Int("2".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_prefixes_are_identifiers() {
        let tests = vec![
            ("letter", Token::Ident("letter".to_string())),
            ("iffy", Token::Ident("iffy".to_string())),
            ("nil?", Token::Ident("nil?".to_string())),
            ("true-ish", Token::Ident("true-ish".to_string())),
            ("not=", Token::NotEqual),
            ("_", Token::Ident("_".to_string())),
        ];

        for (input, expected) in tests {
            let mut lexer = Lexer::new(input);
            assert_eq!(lexer.next_token(), expected);
        }
    }

    #[test]
    fn test_positions() {
        let mut lexer = Lexer::new("(+  12 \"ab\" x)");
        let expected = vec![
            (Token::Lparen, 0),
            (Token::Add, 1),
            (Token::Int("12".to_string()), 4),
            (Token::String("ab".to_string()), 7),
            (Token::Ident("x".to_string()), 12),
            (Token::Rparen, 13),
            (Token::Eof, 14),
        ];

        for (expected_token, expected_position) in expected {
            assert_eq!(lexer.next_token(), expected_token);
            assert_eq!(lexer.position(), expected_position);
        }
    }
}
