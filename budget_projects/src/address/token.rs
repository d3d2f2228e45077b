#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `ul.`, `ulica`, `ulicy`, `ulic`, `ulicach`
    Street,
    /// `al.`, `aleja`, `alei`
    Avenue,
    /// `pl.`, `plac`, `placu`
    Square,
    /// `skrzyżowanie`, `skrzyżowaniu`, `róg`, `rogu`
    Intersection,
    /// `i`, `oraz`
    And,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Comma,
    Word(String),
    /// House numbers keep their letter and slash parts, e.g. `12a` or `49/51`.
    Number(String),
    Keyword(Keyword),
}

impl Token {
    pub fn is_capitalized_word(&self) -> bool {
        matches!(self, Token::Word(word) if word.chars().next().map_or(false, char::is_uppercase))
    }
}
