/// 联赛赛程缓存键前缀
const FIXTURES_PREFIX: &str = "fixtures-";

/// 联赛赛季缓存键前缀
const SEASONS_PREFIX: &str = "seasons-";

/// 联赛信息缓存键前缀
const LEAGUE_PREFIX: &str = "league-";

/// 电视转播缓存键前缀
const TV_PREFIX: &str = "tv-";

/// 按日期赛事（日历）缓存键前缀
const DAY_PREFIX: &str = "day-";

/// 球队搜索缓存键前缀
const TEAMS_PREFIX: &str = "teams-";

/// 生成联赛赛程缓存键
pub fn fixtures_key(league_id: &str) -> String {
    format!("{}{}", FIXTURES_PREFIX, league_id.trim())
}

/// 生成联赛赛季缓存键
pub fn seasons_key(league_id: &str) -> String {
    format!("{}{}", SEASONS_PREFIX, league_id.trim())
}

pub fn league_key(league_id: &str) -> String {
    format!("{}{}", LEAGUE_PREFIX, league_id.trim())
}

pub fn tv_key(date: &str) -> String {
    format!("{}{}", TV_PREFIX, date)
}

pub fn day_key(date: &str) -> String {
    format!("{}{}", DAY_PREFIX, date)
}

/// 球队名大小写不敏感，统一小写
pub fn teams_key(name: &str) -> String {
    format!("{}{}", TEAMS_PREFIX, name.trim().to_lowercase())
}
