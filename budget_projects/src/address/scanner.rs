use multipeek::{multipeek, MultiPeek};
use std::collections::HashMap;
use std::str::Chars;

use lazy_static::lazy_static;

use crate::address::token::{Keyword, Token};

lazy_static! {
    static ref ACRONYMS: HashMap<&'static str, &'static str> = HashMap::from([
        ("gen", "Generała"),
        ("ks", "Księdza"),
        ("św", "Świętego"),
        ("bp", "Biskupa"),
        ("marsz", "Marszałka"),
        ("os", "Osiedle"),
        ("bulw", "Bulwar"),
    ]);
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_alpha(c: char) -> bool {
    c.is_alphabetic() || c == '-'
}

fn is_house_number_part(c: char) -> bool {
    c.is_alphanumeric() || c == '/'
}

/// Anything that cannot start a token. A hyphen only counts inside a word.
fn is_separator(c: char) -> bool {
    !(c.is_alphabetic() || is_digit(c) || matches!(c, ',' | ';'))
}

fn keyword(lexeme: &str) -> Option<Keyword> {
    let keyword = match lexeme.to_lowercase().as_str() {
        "ul" | "ulica" | "ulicy" | "ulic" | "ulicach" => Keyword::Street,
        "al" | "aleja" | "alei" | "alejach" => Keyword::Avenue,
        "pl" | "plac" | "placu" => Keyword::Square,
        "skrzyżowanie" | "skrzyżowaniu" | "róg" | "rogu" => Keyword::Intersection,
        "i" | "oraz" => Keyword::And,
        _ => return None,
    };
    // a capital `I` is a roman numeral, as in `Jana Pawła I`
    (lexeme != "I").then_some(keyword)
}

pub struct Scanner<'a> {
    source: MultiPeek<Chars<'a>>,
    current_lexeme: String,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            source: multipeek(text.chars()),
            current_lexeme: Default::default(),
        }
    }

    fn advance(&mut self) -> Option<char> {
        let next = self.source.next();
        if let Some(c) = next {
            self.current_lexeme.push(c);
        }
        next
    }

    fn peek_check(&mut self, check: &dyn Fn(char) -> bool) -> bool {
        match self.source.peek() {
            Some(&c) => check(c),
            None => false,
        }
    }

    fn advance_while(&mut self, condition: &dyn Fn(char) -> bool) {
        while self.peek_check(condition) {
            self.advance();
        }
    }

    fn advance_but_discard(&mut self, condition: &dyn Fn(char) -> bool) {
        while self.peek_check(condition) {
            self.source.next();
        }
    }

    /// `ul.Mickiewicza` is two tokens: the period closes the abbreviation.
    fn word_or_keyword(&mut self) -> Token {
        self.advance_while(&is_alpha);
        if self.peek_check(&|c| c == '.') {
            self.source.next();
        }
        let lexeme = self.current_lexeme.trim_end_matches('-');

        if let Some(keyword) = keyword(lexeme) {
            return Token::Keyword(keyword);
        }
        let word = ACRONYMS
            .get(lexeme.to_lowercase().as_str())
            .copied()
            .unwrap_or(lexeme);
        Token::Word(word.to_string())
    }

    fn number(&mut self) -> Token {
        self.advance_while(&is_house_number_part);
        Token::Number(self.current_lexeme.trim_end_matches('/').to_string())
    }

    fn scan_next(&mut self) -> Option<Token> {
        self.current_lexeme.clear();

        self.advance_but_discard(&is_separator);

        let token = match self.advance()? {
            ',' | ';' => Token::Comma,
            c if is_digit(c) => self.number(),
            _ => self.word_or_keyword(),
        };

        Some(token)
    }
}

pub fn scan(text: &str) -> Vec<Token> {
    let scanner = ScannerIter {
        scanner: Scanner::new(text),
    };
    scanner.into_iter().collect()
}

struct ScannerIter<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Iterator for ScannerIter<'a> {
    type Item = Token;
    fn next(&mut self) -> Option<Self::Item> {
        self.scanner.scan_next()
    }
}

#[cfg(test)]
mod tests {
    use super::scan;
    use crate::address::token::{Keyword, Token};

    fn word(text: &str) -> Token {
        Token::Word(text.to_string())
    }

    fn number(text: &str) -> Token {
        Token::Number(text.to_string())
    }

    #[test]
    fn test_street_with_house_number() {
        assert_eq!(
            scan("Teren przy ul.Szosa Chełmińska 49/51, obok szkoły."),
            vec![
                word("Teren"),
                word("przy"),
                Token::Keyword(Keyword::Street),
                word("Szosa"),
                word("Chełmińska"),
                number("49/51"),
                Token::Comma,
                word("obok"),
                word("szkoły"),
            ]
        );
    }

    #[test]
    fn test_intersection_and_conjunction_keywords() {
        assert_eq!(
            scan("Skrzyżowanie ulic Reja i Mickiewicza oraz róg al. Solidarności"),
            vec![
                Token::Keyword(Keyword::Intersection),
                Token::Keyword(Keyword::Street),
                word("Reja"),
                Token::Keyword(Keyword::And),
                word("Mickiewicza"),
                Token::Keyword(Keyword::And),
                Token::Keyword(Keyword::Intersection),
                Token::Keyword(Keyword::Avenue),
                word("Solidarności"),
            ]
        );
    }

    #[test]
    fn test_abbreviations_are_expanded() {
        assert_eq!(
            scan("ul. gen. Józefa Bema 12a; os. Młodych"),
            vec![
                Token::Keyword(Keyword::Street),
                word("Generała"),
                word("Józefa"),
                word("Bema"),
                number("12a"),
                Token::Comma,
                word("Osiedle"),
                word("Młodych"),
            ]
        );
    }

    #[test]
    fn test_roman_numeral_is_not_a_conjunction() {
        assert_eq!(
            scan("al. Jana Pawła II i I"),
            vec![
                Token::Keyword(Keyword::Avenue),
                word("Jana"),
                word("Pawła"),
                word("II"),
                Token::Keyword(Keyword::And),
                word("I"),
            ]
        );
    }

    #[test]
    fn test_punctuation_is_skipped() {
        assert_eq!(
            scan("(Park) – „Bulwar”"),
            vec![word("Park"), word("Bulwar")]
        );
        assert!(scan("  ").is_empty());
    }
}
