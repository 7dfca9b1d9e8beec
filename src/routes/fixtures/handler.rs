use axum::{
    extract::{Path, Query, State},
    response::Response,
};

use crate::AppState;
use crate::routes::common::{invalid, is_valid_id, proxy};
use crate::upstream::OriginRequest;

use super::model::DateQuery;

/// 联赛接下来的赛程
#[axum::debug_handler]
pub async fn league_fixtures(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> Response {
    let league_id = league_id.trim().to_string();
    let request = OriginRequest::LeagueFixtures {
        league_id: league_id.clone(),
    };
    if !is_valid_id(&league_id) {
        return invalid(&request, "league id must be numeric");
    }
    proxy(&state.fixtures, request).await
}

/// 某一天的全部赛事，供日历视图使用
#[axum::debug_handler]
pub async fn calendar(State(state): State<AppState>, Query(query): Query<DateQuery>) -> Response {
    match query.resolve() {
        Ok(date) => proxy(&state.fixtures, OriginRequest::EventsByDay { date }).await,
        Err(reason) => invalid(
            &OriginRequest::EventsByDay {
                date: chrono::NaiveDate::MIN,
            },
            &reason,
        ),
    }
}

/// 某一天的电视转播
#[axum::debug_handler]
pub async fn tv_guide(State(state): State<AppState>, Query(query): Query<DateQuery>) -> Response {
    match query.resolve() {
        Ok(date) => proxy(&state.fixtures, OriginRequest::TvByDay { date }).await,
        Err(reason) => invalid(
            &OriginRequest::TvByDay {
                date: chrono::NaiveDate::MIN,
            },
            &reason,
        ),
    }
}
