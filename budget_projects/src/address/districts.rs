use crate::address::token::Token;
use Stem::{Forms, Prefix};

/// A Toruń district and the stem of each of its words. Stems are short enough to
/// match the inflected forms used in project descriptions, e.g. "na Rubinkowie"
/// or "Bydgoskim Przedmieściu".
struct District {
    name: &'static str,
    stems: &'static [Stem],
}

/// Short district names would prefix-match unrelated words ("Jarzębinowa"), those
/// list their inflected forms instead.
enum Stem {
    Prefix(&'static str),
    Forms(&'static [&'static str]),
}

impl Stem {
    fn matches(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        match self {
            Stem::Prefix(prefix) => word.starts_with(prefix),
            Stem::Forms(forms) => forms.contains(&word.as_str()),
        }
    }
}

const DISTRICTS: &[District] = &[
    District { name: "Barbarka", stems: &[Prefix("barbark")] },
    District { name: "Bielany", stems: &[Prefix("bielan")] },
    District { name: "Bielawy", stems: &[Prefix("bielaw")] },
    District { name: "Bydgoskie Przedmieście", stems: &[Prefix("bydgosk"), Prefix("przedmie")] },
    District { name: "Chełmińskie Przedmieście", stems: &[Prefix("chełmińsk"), Prefix("przedmie")] },
    District { name: "Czerniewice", stems: &[Prefix("czerniewic")] },
    District { name: "Glinki", stems: &[Prefix("glink")] },
    District { name: "Grębocin nad Strugą", stems: &[Prefix("grębocin")] },
    District { name: "Jakubskie Przedmieście", stems: &[Prefix("jakubsk"), Prefix("przedmie")] },
    District { name: "Jar", stems: &[Forms(&["jar", "jaru", "jarowi", "jarem", "jarze"])] },
    District { name: "Kaszczorek", stems: &[Prefix("kaszczor")] },
    District { name: "Katarzynka", stems: &[Prefix("katarzyn")] },
    District { name: "Koniuchy", stems: &[Prefix("koniuch")] },
    District { name: "Mokre", stems: &[Prefix("mokr")] },
    District { name: "Na Skarpie", stems: &[Prefix("na"), Prefix("skarp")] },
    District { name: "Nowe Miasto", stems: &[Prefix("now"), Prefix("mi")] },
    District { name: "Piaski", stems: &[Prefix("piask")] },
    District { name: "Podgórz", stems: &[Prefix("podgórz")] },
    District { name: "Rubinkowo", stems: &[Prefix("rubinkow")] },
    District { name: "Rudak", stems: &[Prefix("rudak")] },
    District { name: "Rybaki", stems: &[Prefix("rybak")] },
    District { name: "Stare Miasto", stems: &[Prefix("star"), Prefix("mi")] },
    District { name: "Stare Miasto", stems: &[Prefix("starówk")] },
    District { name: "Starotoruńskie Przedmieście", stems: &[Prefix("starotoruńsk")] },
    District { name: "Stawki", stems: &[Prefix("stawk")] },
    District { name: "Winnica", stems: &[Prefix("winnic")] },
    District { name: "Wrzosy", stems: &[Prefix("wrzos")] },
];

impl District {
    /// The last word has to be capitalized so that common nouns sharing a stem
    /// ("piasku", "stawku") are not taken for a district.
    fn matches(&self, words: &[&str]) -> bool {
        if words.len() < self.stems.len() {
            return false;
        }
        let words = &words[..self.stems.len()];
        let stems_match = words
            .iter()
            .zip(self.stems)
            .all(|(word, stem)| stem.matches(word));
        let is_capitalized = words
            .last()
            .and_then(|word| word.chars().next())
            .map_or(false, char::is_uppercase);
        stems_match && is_capitalized
    }
}

/// The first district mentioned in `tokens`.
pub(super) fn find_district(tokens: &[Token]) -> Option<String> {
    let words = tokens
        .iter()
        .filter_map(|token| match token {
            Token::Word(word) => Some(word.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>();

    (0..words.len()).find_map(|start| {
        DISTRICTS
            .iter()
            .find(|district| district.matches(&words[start..]))
            .map(|district| district.name.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::find_district;
    use crate::address::scanner::scan;
    use rstest::rstest;

    #[rstest]
    #[case("Park na Bydgoskim Przedmieściu", Some("Bydgoskie Przedmieście"))]
    #[case("teren osiedla na Skarpie", Some("Na Skarpie"))]
    #[case("skwer na Rubinkowie", Some("Rubinkowo"))]
    #[case("boisko w Podgórzu", Some("Podgórz"))]
    #[case("zabytki Starego Miasta", Some("Stare Miasto"))]
    #[case("kino na Starówce", Some("Stare Miasto"))]
    #[case("plac zabaw przy piaskownicy", None)]
    #[case("ścieżka w Jarze", Some("Jar"))]
    #[case("chodnik przy Jarzębinowej", None)]
    #[case("", None)]
    fn test_find_district(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(find_district(&scan(text)).as_deref(), expected);
    }
}
