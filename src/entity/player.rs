use std::any::Any;
use std::io::Write;

use super::Entity;
use crate::save::{SaveError, TokenReader};

/// Type tag for player records
pub const PLAYER_TAG: &str = "Player";

/// A named character with health and level
///
/// No range checks are applied: any `i32` is a valid health or level,
/// including negative values. The name must be a non-empty token without
/// whitespace; `serialize` refuses anything else, since it could not be
/// read back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    name: String,
    health: i32,
    level: i32,
}

impl Player {
    pub fn new(name: impl Into<String>, health: i32, level: i32) -> Self {
        Player {
            name: name.into(),
            health,
            level,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// Factory registered under [`PLAYER_TAG`]
    pub fn create_default() -> Box<dyn Entity> {
        Box::new(Player::default())
    }
}

impl Entity for Player {
    fn type_tag(&self) -> &'static str {
        PLAYER_TAG
    }

    fn describe(&self) -> String {
        format!(
            "Player: {}, Health: {}, Level: {}",
            self.name, self.health, self.level
        )
    }

    fn serialize(&self, out: &mut dyn Write) -> Result<(), SaveError> {
        if self.name.is_empty() || self.name.contains(char::is_whitespace) {
            return Err(SaveError::UnwritableField {
                field: "name",
                value: self.name.clone(),
            });
        }

        writeln!(
            out,
            "{} {} {} {}",
            PLAYER_TAG, self.name, self.health, self.level
        )?;
        Ok(())
    }

    fn load(&mut self, fields: &mut TokenReader<'_>) -> Result<(), SaveError> {
        self.name = fields.expect_token("name")?;
        self.health = fields.parse_field("health")?;
        self.level = fields.parse_field("level")?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
