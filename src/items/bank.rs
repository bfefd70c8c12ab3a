use std::collections::HashSet;
use std::path::Path;
use crate::error::QuizError;
use crate::items::item::Item;

/// Immutable, ordered collection of quiz items.
#[derive(Debug, Clone, Default)]
pub struct ItemBank {
    items: Vec<Item>,
}

impl ItemBank {
    /// Build a bank, rejecting items without any reading and repeated kanji.
    pub fn from_items(items: Vec<Item>) -> Result<Self, QuizError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for item in &items {
            if item.readings.is_empty() {
                return Err(QuizError::InvalidItem(item.identity.clone()));
            }
            if !seen.insert(item.identity.as_str()) {
                return Err(QuizError::DuplicateItem(item.identity.clone()));
            }
        }
        Ok(ItemBank { items })
    }

    pub fn from_json_str(json: &str) -> Result<Self, QuizError> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Self::from_items(items)
    }

    /// Load a `questions.json`-style array of items.
    pub fn load(path: &Path) -> Result<Self, QuizError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            tracing::error!(path = ?path, error = %e, "Failed to read item bank");
            e
        })?;
        let bank = Self::from_json_str(&json)?;
        tracing::info!(path = ?path, items = bank.len(), "Item bank loaded");
        Ok(bank)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, identity: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.identity == identity)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_item_without_readings() {
        let result = ItemBank::from_items(vec![
            Item::new("猫", vec!["ねこ".into()]),
            Item::new("犬", vec![]),
        ]);
        match result {
            Err(QuizError::InvalidItem(id)) => assert_eq!(id, "犬"),
            other => panic!("expected InvalidItem, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_repeated_kanji() {
        let result = ItemBank::from_items(vec![
            Item::new("猫", vec!["ねこ".into()]),
            Item::new("犬", vec!["いぬ".into()]),
            Item::new("猫", vec!["びょう".into()]),
        ]);
        match result {
            Err(QuizError::DuplicateItem(id)) => assert_eq!(id, "猫"),
            other => panic!("expected DuplicateItem, got {:?}", other),
        }

        let json = r#"[{"kanji":"猫","yomi":["ねこ"]},{"kanji":"猫","yomi":["びょう"]}]"#;
        assert!(matches!(
            ItemBank::from_json_str(json),
            Err(QuizError::DuplicateItem(_))
        ));
    }

    #[test]
    fn test_parses_json_array_in_order() {
        let bank = ItemBank::from_json_str(
            r#"[{"kanji":"猫","yomi":["ねこ"]},{"kanji":"犬","yomi":["いぬ"]}]"#,
        )
        .unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.items()[1].identity, "犬");
        assert!(bank.get("猫").is_some());
        assert!(bank.get("鳥").is_none());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            ItemBank::from_json_str("{not json"),
            Err(QuizError::Json(_))
        ));
    }
}
