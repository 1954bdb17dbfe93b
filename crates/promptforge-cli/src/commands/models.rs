use anyhow::Result;
use clap::ArgMatches;
use promptforge_reasoning::profiles::model_profiles;
use serde_json::{Map, Value};

use super::CommandHandler;

/// Models command handler
pub struct ModelsCommand;

impl ModelsCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ModelsCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandler for ModelsCommand {
    async fn execute(&self, _matches: &ArgMatches) -> Result<Value> {
        let mut models = Map::new();
        for (name, profile) in model_profiles() {
            models.insert(name.to_string(), serde_json::to_value(profile)?);
        }
        Ok(Value::Object(models))
    }
}
