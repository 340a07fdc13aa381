use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

pub const WEBHOOK_KEY: &str = "webhook";
pub const TEXT_KEY: &str = "text";

/// One entry of a configuration category
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum CategoryItem {
    Plain(String),
    Described {
        #[serde(default)]
        description: Option<String>,
        #[serde(rename = "type", default)]
        item_type: Option<String>,
        #[serde(default)]
        default: Option<String>,
        #[serde(default)]
        value: Option<String>,
    },
}

impl CategoryItem {
    fn current(&self) -> Option<&str> {
        match self {
            CategoryItem::Plain(v) => Some(v.as_str()),
            CategoryItem::Described { value, default, .. } => value.as_deref().or(default.as_deref()),
        }
    }
}

/// A parsed configuration category, keyed by item name
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Category {
    pub name: String,
    items: BTreeMap<String, CategoryItem>,
}

impl Category {
    pub fn parse(name: &str, text: &str) -> Result<Self, ConfigError> {
        let raw: Value = serde_json::from_str(text)?;
        let Value::Object(entries) = raw else {
            return Err(ConfigError::NotAnObject);
        };

        let mut items = BTreeMap::new();
        for (key, entry) in entries {
            // Items that are neither strings nor objects of strings carry nothing we read
            if let Ok(item) = serde_json::from_value::<CategoryItem>(entry) {
                items.insert(key, item);
            }
        }

        Ok(Category {
            name: name.to_string(),
            items,
        })
    }

    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        let item = self
            .items
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;

        item.current()
            .map(str::to_string)
            .ok_or_else(|| ConfigError::NoValue(key.to_string()))
    }

    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }
}

/// The two settings the adapter reads from its category
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct NotifierConfig {
    pub webhook: String,
    pub text: String,
}

impl NotifierConfig {
    pub fn from_category(category: &Category) -> Result<Self, ConfigError> {
        Ok(NotifierConfig {
            webhook: category.get_value(WEBHOOK_KEY)?,
            text: category.get_value(TEXT_KEY)?,
        })
    }

    /// Like `from_category`, but a missing item reads as an empty string
    pub fn from_category_lenient(category: &Category) -> Self {
        NotifierConfig {
            webhook: category.get_value(WEBHOOK_KEY).unwrap_or_default(),
            text: category.get_value(TEXT_KEY).unwrap_or_default(),
        }
    }
}

/// Default configuration category advertised by the plugin
pub fn default_category() -> Value {
    let mut category = Map::new();
    category.insert(
        "plugin".to_string(),
        json!({
            "description": "Google Hangouts notification delivery plugin",
            "type": "string",
            "default": "Hangouts",
            "readonly": "true"
        }),
    );
    category.insert(
        WEBHOOK_KEY.to_string(),
        json!({
            "description": "Google Hangouts webhook URL",
            "type": "string",
            "default": "https://chat.googleapis.com/v1/spaces/",
            "order": "1",
            "displayName": "Hangouts Webhook"
        }),
    );
    category.insert(
        TEXT_KEY.to_string(),
        json!({
            "description": "Static text appended to every notification",
            "type": "string",
            "default": "Hello from Fledge",
            "order": "2",
            "displayName": "Message Text"
        }),
    );
    category.insert(
        "enable".to_string(),
        json!({
            "description": "A switch that can be used to enable or disable execution of the Hangouts notification plugin.",
            "type": "boolean",
            "displayName": "Enabled",
            "default": "false"
        }),
    );
    Value::Object(category)
}
