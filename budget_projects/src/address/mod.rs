//! Guessing a street address from a free text project location.

mod districts;
mod scanner;
mod token;

use itertools::Itertools;
use tracing::info;

use crate::address::districts::find_district;
use crate::address::scanner::scan;
use crate::address::token::{Keyword, Token};
use crate::project::BudgetProject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressRule {
    Intersection,
    StreetPrefix,
    MarketSquare,
    NameWithNumber,
    District,
    CityFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedAddress {
    pub text: String,
    pub rule: AddressRule,
}

type Rule = fn(&[Token]) -> Option<String>;

/// Tried in order, the first match wins.
const RULES: &[(AddressRule, Rule)] = &[
    (AddressRule::Intersection, intersection),
    (AddressRule::StreetPrefix, street_prefix),
    (AddressRule::MarketSquare, market_square),
    (AddressRule::NameWithNumber, name_with_number),
    (AddressRule::District, find_district),
];

pub fn extract_address(location: &str, city: &str) -> ExtractedAddress {
    let tokens = scan(location);
    RULES
        .iter()
        .find_map(|(rule, apply)| {
            apply(&tokens).map(|text| ExtractedAddress { text, rule: *rule })
        })
        .unwrap_or_else(|| ExtractedAddress {
            text: city.to_string(),
            rule: AddressRule::CityFallback,
        })
}

/// Fills `address` on every project. A hand written `address_manual` is taken as
/// is; otherwise the location, or the name when there is no location, goes
/// through [`extract_address`].
#[tracing::instrument(skip(projects), level = "info")]
pub fn fill_addresses(projects: &mut [BudgetProject], city: &str) {
    let mut rules = vec![];
    for project in projects.iter_mut() {
        let manual = project
            .address_manual
            .as_deref()
            .map(str::trim)
            .filter(|manual| !manual.is_empty());
        if let Some(manual) = manual {
            project.address = manual.to_string();
            continue;
        }

        let location = project
            .location
            .as_deref()
            .filter(|location| !location.trim().is_empty())
            .unwrap_or(&project.name);
        let extracted = extract_address(location, city);
        project.address = extracted.text;
        rules.push(extracted.rule);
    }

    let counts = rules.into_iter().counts();
    info!(
        manual = projects.len() - counts.values().sum::<usize>(),
        "Addresses filled, by rule: {counts:?}"
    );
}

fn is_named_place(token: &Token) -> bool {
    token.is_capitalized_word() || matches!(token, Token::Keyword(Keyword::Avenue | Keyword::Square))
}

fn capitalized_words(tokens: &[Token]) -> Vec<&str> {
    tokens
        .iter()
        .map_while(|token| match token {
            Token::Word(word) if token.is_capitalized_word() => Some(word.as_str()),
            _ => None,
        })
        .collect()
}

/// A street name at the start of `tokens` and the house number that follows it.
/// Avenues and squares keep their `Aleja` / `Plac` word.
fn street_name(tokens: &[Token]) -> Option<(String, Option<&str>)> {
    let (prefix, rest) = match tokens.first() {
        Some(Token::Keyword(Keyword::Avenue)) => (Some("Aleja"), &tokens[1..]),
        Some(Token::Keyword(Keyword::Square)) => (Some("Plac"), &tokens[1..]),
        Some(Token::Keyword(Keyword::Street)) => (None, &tokens[1..]),
        _ => (None, tokens),
    };

    let words = capitalized_words(rest);
    if words.is_empty() {
        return None;
    }
    let number = match rest.get(words.len()) {
        Some(Token::Number(number)) => Some(number.as_str()),
        _ => None,
    };
    let name = prefix.into_iter().chain(words).join(" ");
    Some((name, number))
}

/// `skrzyżowanie ulic Reja i Mickiewicza` names the first street.
fn intersection(tokens: &[Token]) -> Option<String> {
    let marker = tokens
        .iter()
        .position(|token| *token == Token::Keyword(Keyword::Intersection))?;
    let rest = &tokens[marker + 1..];
    let start = rest.iter().position(is_named_place)?;
    street_name(&rest[start..]).map(|(name, _)| name)
}

fn street_prefix(tokens: &[Token]) -> Option<String> {
    tokens.iter().enumerate().find_map(|(index, token)| match token {
        Token::Keyword(Keyword::Street | Keyword::Avenue | Keyword::Square) => {
            street_name(&tokens[index..]).map(|(name, number)| match number {
                Some(number) => format!("{name} {number}"),
                None => name,
            })
        }
        _ => None,
    })
}

fn market_square(tokens: &[Token]) -> Option<String> {
    tokens
        .iter()
        .tuple_windows()
        .find_map(|pair| match pair {
            (Token::Word(first), Token::Word(second))
                if matches!(first.to_lowercase().as_str(), "rynek" | "rynku") =>
            {
                let second = second.to_lowercase();
                if second.starts_with("staromiejsk") {
                    Some("Rynek Staromiejski")
                } else if second.starts_with("nowomiejsk") {
                    Some("Rynek Nowomiejski")
                } else {
                    None
                }
            }
            _ => None,
        })
        .map(str::to_string)
}

/// A run of capitalized words directly followed by a number, such as
/// `Przedszkole Miejskie 12`.
fn name_with_number(tokens: &[Token]) -> Option<String> {
    (0..tokens.len()).find_map(|start| {
        let continues_a_run = start > 0 && tokens[start - 1].is_capitalized_word();
        if continues_a_run {
            return None;
        }
        let words = capitalized_words(&tokens[start..]);
        match tokens.get(start + words.len()) {
            Some(Token::Number(number)) if !words.is_empty() => {
                Some(format!("{} {number}", words.join(" ")))
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{extract_address, fill_addresses, AddressRule};
    use crate::project::BudgetProject;
    use rstest::rstest;

    #[rstest]
    #[case("Skrzyżowanie ulic Mickiewicza i Reja", "Mickiewicza", AddressRule::Intersection)]
    #[case("na rogu al. Solidarności i ul. Mickiewicza 5", "Aleja Solidarności", AddressRule::Intersection)]
    #[case("ul. Mickiewicza 10", "Mickiewicza 10", AddressRule::StreetPrefix)]
    #[case("Teren przy ulicy Szosa Chełmińska 49/51", "Szosa Chełmińska 49/51", AddressRule::StreetPrefix)]
    #[case("al. Jana Pawła II", "Aleja Jana Pawła II", AddressRule::StreetPrefix)]
    #[case("pl. Rapackiego", "Plac Rapackiego", AddressRule::StreetPrefix)]
    #[case("plac zabaw przy ul. Dziewulskiego, Rubinkowo", "Dziewulskiego", AddressRule::StreetPrefix)]
    #[case("ul. gen. Józefa Bema 12a", "Generała Józefa Bema 12a", AddressRule::StreetPrefix)]
    #[case("Koncert na Rynku Staromiejskim", "Rynek Staromiejski", AddressRule::MarketSquare)]
    #[case("rynek Nowomiejski", "Rynek Nowomiejski", AddressRule::MarketSquare)]
    #[case("Budynek Przedszkole Miejskie 12", "Budynek Przedszkole Miejskie 12", AddressRule::NameWithNumber)]
    #[case("teren przy Szkole Podstawowej 5", "Szkole Podstawowej 5", AddressRule::NameWithNumber)]
    #[case("Park na Bydgoskim Przedmieściu", "Bydgoskie Przedmieście", AddressRule::District)]
    #[case("osiedle na Skarpie", "Na Skarpie", AddressRule::District)]
    #[case("teren całego miasta", "Toruń", AddressRule::CityFallback)]
    #[case("", "Toruń", AddressRule::CityFallback)]
    fn test_extract_address(
        #[case] location: &str,
        #[case] expected: &str,
        #[case] rule: AddressRule,
    ) {
        let address = extract_address(location, "Toruń");
        assert_eq!(address.text, expected);
        assert_eq!(address.rule, rule);
    }

    fn project(name: &str, location: Option<&str>, manual: Option<&str>) -> BudgetProject {
        let mut project = BudgetProject::new(name.to_string(), 1000, String::new());
        project.location = location.map(str::to_string);
        project.address_manual = manual.map(str::to_string);
        project
    }

    #[test]
    fn test_fill_addresses_prefers_manual_then_location_then_name() {
        let mut projects = vec![
            project("Ławki", Some("ul. Reja 1"), Some(" Bulwar Filadelfijski ")),
            project("Ławki", Some("ul. Reja 1"), Some("")),
            project("Siłownia na Wrzosach", Some(" "), None),
            project("Zieleń", None, None),
        ];

        fill_addresses(&mut projects, "Toruń");

        let addresses = projects
            .iter()
            .map(|project| project.address.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            addresses,
            vec!["Bulwar Filadelfijski", "Reja 1", "Wrzosy", "Toruń"]
        );
    }
}
