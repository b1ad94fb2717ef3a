//! Parsing the skill-selection line typed at the menu.
//!
//! Accepted forms:
//!
//! - `all`
//! - `random:N` picks N skills at random (capped at the number available)
//! - `level:L` picks skills that have at least one question at level L
//! - `1-5` an inclusive range of list positions
//! - `1,3,5` or `4` explicit list positions
//! - `Python,React` names, matched as case-insensitive substrings

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

/// One row of the numbered skill list shown before the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillListing {
    pub name: String,
    pub total: u64,
    pub by_level: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillSelection {
    All,
    Random(usize),
    Level(String),
    Range { start: usize, end: usize },
    Positions(Vec<usize>),
    Names(Vec<String>),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("nothing entered")]
    Empty,
    #[error("invalid format, use random:5")]
    InvalidRandom,
    #[error("invalid range, use 1-5")]
    InvalidRange,
    #[error("no skills matched '{0}'")]
    NoMatch(String),
}

/// The skills picked, plus notes about entries that were ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub skills: Vec<String>,
    pub warnings: Vec<String>,
}

impl SkillSelection {
    pub fn parse(input: &str) -> Result<Self, SelectionError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectionError::Empty);
        }
        let lower = input.to_lowercase();

        if lower == "all" {
            return Ok(Self::All);
        }
        if let Some(count) = lower.strip_prefix("random:") {
            return count
                .trim()
                .parse()
                .map(Self::Random)
                .map_err(|_| SelectionError::InvalidRandom);
        }
        if let Some(level) = lower.strip_prefix("level:") {
            return Ok(Self::Level(level.trim().to_string()));
        }
        if input.contains('-')
            && input
                .chars()
                .all(|c| c.is_ascii_digit() || c == '-' || c == ' ')
        {
            let mut bounds = input.split('-').map(|part| part.trim().parse::<usize>());
            return match (bounds.next(), bounds.next(), bounds.next()) {
                (Some(Ok(start)), Some(Ok(end)), None) => Ok(Self::Range { start, end }),
                _ => Err(SelectionError::InvalidRange),
            };
        }

        let parts: Vec<&str> = input
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            return Err(SelectionError::Empty);
        }
        let positions: Result<Vec<usize>, _> = parts.iter().map(|p| p.parse::<usize>()).collect();
        match positions {
            Ok(positions) => Ok(Self::Positions(positions)),
            Err(_) => Ok(Self::Names(parts.into_iter().map(str::to_string).collect())),
        }
    }

    /// Maps the selection onto the listed skills. Positions are 1-based.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        listing: &[SkillListing],
        rng: &mut R,
    ) -> Result<Resolution, SelectionError> {
        let mut resolution = Resolution::default();
        match self {
            Self::All => {
                resolution.skills = listing.iter().map(|s| s.name.clone()).collect();
            }
            Self::Random(count) => {
                let count = (*count).min(listing.len());
                resolution.skills = listing
                    .choose_multiple(rng, count)
                    .map(|s| s.name.clone())
                    .collect();
            }
            Self::Level(level) => {
                resolution.skills = listing
                    .iter()
                    .filter(|s| s.by_level.get(level).is_some_and(|n| *n > 0))
                    .map(|s| s.name.clone())
                    .collect();
            }
            Self::Range { start, end } => {
                resolution.skills = (*start..=(*end).min(listing.len()))
                    .filter_map(|i| position(listing, i))
                    .map(|s| s.name.clone())
                    .collect();
            }
            Self::Positions(positions) => {
                for &i in positions {
                    match position(listing, i) {
                        Some(skill) => push_unique(&mut resolution.skills, &skill.name),
                        None => resolution.warnings.push(format!("Number {i} out of range")),
                    }
                }
            }
            Self::Names(names) => {
                for name in names {
                    let needle = name.to_lowercase();
                    let matches: Vec<&SkillListing> = listing
                        .iter()
                        .filter(|s| s.name.to_lowercase().contains(&needle))
                        .collect();
                    if matches.is_empty() {
                        resolution.warnings.push(format!("Skill not found: {name}"));
                    }
                    for skill in matches {
                        push_unique(&mut resolution.skills, &skill.name);
                    }
                }
            }
        }

        if resolution.skills.is_empty() {
            return Err(SelectionError::NoMatch(self.to_string()));
        }
        Ok(resolution)
    }
}

impl std::fmt::Display for SkillSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Random(n) => write!(f, "random:{n}"),
            Self::Level(level) => write!(f, "level:{level}"),
            Self::Range { start, end } => write!(f, "{start}-{end}"),
            Self::Positions(positions) => {
                let joined: Vec<String> = positions.iter().map(usize::to_string).collect();
                write!(f, "{}", joined.join(","))
            }
            Self::Names(names) => write!(f, "{}", names.join(",")),
        }
    }
}

fn position(listing: &[SkillListing], i: usize) -> Option<&SkillListing> {
    i.checked_sub(1).and_then(|idx| listing.get(idx))
}

fn push_unique(skills: &mut Vec<String>, name: &str) {
    if !skills.iter().any(|s| s == name) {
        skills.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn listing() -> Vec<SkillListing> {
        [
            ("AWS", &[("advanced", 2), ("basic", 1)][..]),
            ("JavaScript", &[("basic", 3)][..]),
            ("Python", &[("basic", 2), ("advanced", 1)][..]),
            ("React", &[("intermediate", 4)][..]),
        ]
        .into_iter()
        .map(|(name, levels)| SkillListing {
            name: name.to_string(),
            total: levels.iter().map(|(_, n)| *n).sum(),
            by_level: levels
                .iter()
                .map(|(level, n)| (level.to_string(), *n))
                .collect(),
        })
        .collect()
    }

    fn pick(input: &str) -> Result<Resolution, SelectionError> {
        let mut rng = StdRng::seed_from_u64(7);
        SkillSelection::parse(input)?.resolve(&listing(), &mut rng)
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(SkillSelection::parse(" ALL "), Ok(SkillSelection::All));
        assert_eq!(SkillSelection::parse("random:3"), Ok(SkillSelection::Random(3)));
        assert_eq!(
            SkillSelection::parse("level:Basic"),
            Ok(SkillSelection::Level("basic".to_string()))
        );
        assert_eq!(
            SkillSelection::parse("2 - 4"),
            Ok(SkillSelection::Range { start: 2, end: 4 })
        );
        assert_eq!(
            SkillSelection::parse("1, 3"),
            Ok(SkillSelection::Positions(vec![1, 3]))
        );
        assert_eq!(
            SkillSelection::parse("4"),
            Ok(SkillSelection::Positions(vec![4]))
        );
        assert_eq!(
            SkillSelection::parse("python, react"),
            Ok(SkillSelection::Names(vec![
                "python".to_string(),
                "react".to_string()
            ]))
        );
        assert_eq!(
            SkillSelection::parse("Node.js"),
            Ok(SkillSelection::Names(vec!["Node.js".to_string()]))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(SkillSelection::parse("   "), Err(SelectionError::Empty));
        assert_eq!(
            SkillSelection::parse("random:many"),
            Err(SelectionError::InvalidRandom)
        );
        assert_eq!(
            SkillSelection::parse("1-2-3"),
            Err(SelectionError::InvalidRange)
        );
        assert_eq!(SkillSelection::parse(","), Err(SelectionError::Empty));
    }

    #[test]
    fn test_resolve_all_and_range() {
        assert_eq!(pick("all").unwrap().skills.len(), 4);
        assert_eq!(
            pick("2-9").unwrap().skills,
            vec!["JavaScript", "Python", "React"]
        );
        assert!(matches!(pick("7-9"), Err(SelectionError::NoMatch(_))));
    }

    #[test]
    fn test_resolve_range_with_huge_upper_bound() {
        assert_eq!(pick("1-99999999999").unwrap().skills.len(), 4);
        assert_eq!(
            pick("4-18446744073709551615").unwrap().skills,
            vec!["React"]
        );
    }

    #[test]
    fn test_resolve_positions_warn_out_of_range() {
        let resolution = pick("3,0,9,3").unwrap();
        assert_eq!(resolution.skills, vec!["Python"]);
        assert_eq!(
            resolution.warnings,
            vec!["Number 0 out of range", "Number 9 out of range"]
        );
    }

    #[test]
    fn test_resolve_names_by_substring() {
        let resolution = pick("script,PYTH,Rust").unwrap();
        assert_eq!(resolution.skills, vec!["JavaScript", "Python"]);
        assert_eq!(resolution.warnings, vec!["Skill not found: Rust"]);
    }

    #[test]
    fn test_resolve_level() {
        assert_eq!(pick("level:advanced").unwrap().skills, vec!["AWS", "Python"]);
        assert!(matches!(pick("level:expert"), Err(SelectionError::NoMatch(_))));
    }

    #[test]
    fn test_resolve_random_is_capped_subset() {
        let resolution = pick("random:10").unwrap();
        assert_eq!(resolution.skills.len(), 4);

        let resolution = pick("random:2").unwrap();
        assert_eq!(resolution.skills.len(), 2);
        let names: Vec<String> = listing().into_iter().map(|s| s.name).collect();
        assert!(resolution.skills.iter().all(|s| names.contains(s)));
        assert_ne!(resolution.skills[0], resolution.skills[1]);

        assert!(matches!(pick("random:0"), Err(SelectionError::NoMatch(_))));
    }
}
