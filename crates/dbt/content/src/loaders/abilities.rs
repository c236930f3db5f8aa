//! Ability definition loader.

use std::path::Path;

use crate::formats::AbilitySpec;
use crate::loaders::{LoadResult, read_file};

/// Loader for ability definitions from RON files.
///
/// RON format: `Vec<AbilitySpec>`
pub struct AbilityLoader;

impl AbilityLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<AbilitySpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<AbilitySpec>> {
        let abilities: Vec<AbilitySpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse abilities RON: {}", e))?;

        for (i, ability) in abilities.iter().enumerate() {
            if abilities[..i].iter().any(|other| other.name == ability.name) {
                anyhow::bail!("Duplicate ability definition '{}'", ability.name);
            }
        }
        Ok(abilities)
    }
}

#[cfg(test)]
mod tests {
    use dbt_core::AbilityCategory;

    use super::*;

    #[test]
    fn parses_abilities_with_default_category() {
        let abilities = AbilityLoader::parse(
            r#"[
                (name: "Fireball", category: Offensive),
                (name: "Mend", category: Supporting),
                (name: "Jab"),
            ]"#,
        )
        .unwrap();

        assert_eq!(abilities.len(), 3);
        assert_eq!(abilities[1].category, AbilityCategory::Supporting);
        assert_eq!(abilities[2].category, AbilityCategory::Offensive);
    }

    #[test]
    fn rejects_duplicates() {
        let err = AbilityLoader::parse(r#"[(name: "Jab"), (name: "Jab")]"#).unwrap_err();
        assert!(err.to_string().contains("Jab"));
    }
}
