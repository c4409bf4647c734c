//! Server status strings carried by unconnected pongs.

use std::fmt;

/// Something that can render the status string a server advertises.
pub trait Identifier {
    fn build(&self) -> String;
}

impl Identifier for str {
    fn build(&self) -> String {
        self.to_owned()
    }
}

impl Identifier for String {
    fn build(&self) -> String {
        self.clone()
    }
}

/// An opaque status string, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicIdentifier(pub String);

impl Identifier for BasicIdentifier {
    fn build(&self) -> String {
        self.0.clone()
    }
}

impl From<&str> for BasicIdentifier {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Separator between fields of a Minecraft status string.
const SEPARATOR: char = ';';

/// Bedrock-style server status: `MCPE;motd;protocol;version;online;max;guid;world;gamemode;`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinecraftIdentifier {
    pub edition: String,
    pub motd: String,
    pub protocol: u32,
    pub version: String,
    pub online_players: u32,
    pub max_players: u32,
    pub server_guid: i64,
    pub world_name: String,
    pub gamemode: String,
}

impl MinecraftIdentifier {
    /// Edition tag for Bedrock servers.
    pub const EDITION: &'static str = "MCPE";

    /// Parses a status string; `None` when a field is missing or not numeric.
    ///
    /// Fields after the gamemode (ports and the like) are ignored.
    #[must_use]
    pub fn parse(status: &str) -> Option<Self> {
        let mut fields = status.split(SEPARATOR);
        let edition = fields.next()?.to_owned();
        let motd = fields.next()?.to_owned();
        let protocol = fields.next()?.parse().ok()?;
        let version = fields.next()?.to_owned();
        let online_players = fields.next()?.parse().ok()?;
        let max_players = fields.next()?.parse().ok()?;
        let server_guid = fields.next()?.parse().ok()?;
        let world_name = fields.next()?.to_owned();
        let gamemode = fields.next()?.to_owned();
        Some(Self {
            edition,
            motd,
            protocol,
            version,
            online_players,
            max_players,
            server_guid,
            world_name,
            gamemode,
        })
    }
}

impl fmt::Display for MinecraftIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Semicolons inside free-text fields would shift every later field.
        let clean = |text: &str| text.replace(SEPARATOR, "");
        write!(
            f,
            "{};{};{};{};{};{};{};{};{};",
            clean(&self.edition),
            clean(&self.motd),
            self.protocol,
            clean(&self.version),
            self.online_players,
            self.max_players,
            self.server_guid,
            clean(&self.world_name),
            clean(&self.gamemode),
        )
    }
}

impl Identifier for MinecraftIdentifier {
    fn build(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MinecraftIdentifier {
        MinecraftIdentifier {
            edition: MinecraftIdentifier::EDITION.to_owned(),
            motd: "Dedicated Server".to_owned(),
            protocol: 390,
            version: "1.14.60".to_owned(),
            online_players: 3,
            max_players: 10,
            server_guid: 5_123_698_241_234_567_890,
            world_name: "Bedrock level".to_owned(),
            gamemode: "Survival".to_owned(),
        }
    }

    #[test]
    fn basic_identifier_passthrough() {
        assert_eq!(BasicIdentifier::from("hello").build(), "hello");
        assert_eq!("raw".build(), "raw");
        assert_eq!(String::from("owned").build(), "owned");
    }

    #[test]
    fn minecraft_build_layout() {
        assert_eq!(
            sample().build(),
            "MCPE;Dedicated Server;390;1.14.60;3;10;5123698241234567890;Bedrock level;Survival;"
        );
    }

    #[test]
    fn minecraft_build_strips_separators() {
        let mut id = sample();
        id.motd = "a;b".to_owned();
        assert!(id.build().starts_with("MCPE;ab;390;"));
    }

    #[test]
    fn minecraft_parse_roundtrip() {
        let id = sample();
        assert_eq!(MinecraftIdentifier::parse(&id.build()), Some(id));
    }

    #[test]
    fn minecraft_parse_ignores_trailing_fields() {
        let status = "MCPE;motd;1;v;0;1;2;world;Creative;1;19132;19133;";
        let id = MinecraftIdentifier::parse(status).unwrap();
        assert_eq!(id.gamemode, "Creative");
        assert_eq!(id.server_guid, 2);
    }

    #[test]
    fn minecraft_parse_rejects_short_or_bad_numbers() {
        assert_eq!(MinecraftIdentifier::parse("MCPE;motd;390"), None);
        assert_eq!(
            MinecraftIdentifier::parse("MCPE;motd;abc;v;0;1;2;w;g;"),
            None
        );
    }
}
