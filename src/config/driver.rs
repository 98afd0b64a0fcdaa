use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DriverConfig {
    /// Print the in-order listing after every command, not only at the end
    #[serde(default)]
    pub print_after_each: bool,
}
