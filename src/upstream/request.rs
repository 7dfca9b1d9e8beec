use chrono::NaiveDate;
use serde_json::{Value, json};

use crate::cache::keys;

/// 一次回源请求，同时决定缓存键与失败时返回的空结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginRequest {
    LeagueFixtures { league_id: String },
    LeagueSeasons { league_id: String },
    League { league_id: String },
    TvByDay { date: NaiveDate },
    EventsByDay { date: NaiveDate },
    TeamSearch { name: String },
}

impl OriginRequest {
    /// 接口路径与查询参数
    pub fn endpoint(&self) -> (&'static str, Vec<(&'static str, String)>) {
        match self {
            OriginRequest::LeagueFixtures { league_id } => {
                ("eventsnextleague.php", vec![("id", league_id.clone())])
            }
            OriginRequest::LeagueSeasons { league_id } => {
                ("search_all_seasons.php", vec![("id", league_id.clone())])
            }
            OriginRequest::League { league_id } => {
                ("lookupleague.php", vec![("id", league_id.clone())])
            }
            OriginRequest::TvByDay { date } => ("eventstv.php", vec![("d", date.to_string())]),
            OriginRequest::EventsByDay { date } => ("eventsday.php", vec![("d", date.to_string())]),
            OriginRequest::TeamSearch { name } => ("searchteams.php", vec![("t", name.clone())]),
        }
    }

    pub fn cache_key(&self) -> String {
        match self {
            OriginRequest::LeagueFixtures { league_id } => keys::fixtures_key(league_id),
            OriginRequest::LeagueSeasons { league_id } => keys::seasons_key(league_id),
            OriginRequest::League { league_id } => keys::league_key(league_id),
            OriginRequest::TvByDay { date } => keys::tv_key(&date.to_string()),
            OriginRequest::EventsByDay { date } => keys::day_key(&date.to_string()),
            OriginRequest::TeamSearch { name } => keys::teams_key(name),
        }
    }

    /// 响应里承载列表的字段名
    pub fn collection(&self) -> &'static str {
        match self {
            OriginRequest::LeagueFixtures { .. } | OriginRequest::EventsByDay { .. } => "events",
            OriginRequest::LeagueSeasons { .. } => "seasons",
            OriginRequest::League { .. } => "leagues",
            OriginRequest::TvByDay { .. } => "tvevents",
            OriginRequest::TeamSearch { .. } => "teams",
        }
    }

    /// 上游失败时返回的空结果，例如 `{ "events": [] }`
    pub fn empty_body(&self) -> Value {
        json!({ self.collection(): [] })
    }

    /// 上游没有数据时会返回 `null`，统一成空数组
    pub fn normalize(&self, mut body: Value) -> Value {
        let field = self.collection();
        match body.as_object_mut() {
            Some(object) => {
                let slot = object.entry(field).or_insert(Value::Null);
                if slot.is_null() {
                    *slot = Value::Array(Vec::new());
                }
                body
            }
            None => self.empty_body(),
        }
    }
}
