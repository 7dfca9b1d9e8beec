use serde::Deserialize;

/// 球队名搜索最大长度
pub const MAX_TEAM_NAME_LEN: usize = 64;

#[derive(Debug, Deserialize)]
pub struct TeamQuery {
    pub name: Option<String>,
}

impl TeamQuery {
    pub fn name(&self) -> Result<String, String> {
        let name = self.name.as_deref().unwrap_or_default().trim();
        if name.is_empty() {
            return Err("name is required".to_string());
        }
        if name.chars().count() > MAX_TEAM_NAME_LEN {
            return Err(format!("name longer than {} characters", MAX_TEAM_NAME_LEN));
        }
        if name.chars().any(char::is_control) {
            return Err("name contains control characters".to_string());
        }
        Ok(name.to_string())
    }
}
