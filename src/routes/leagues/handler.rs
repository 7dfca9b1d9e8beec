use axum::{
    extract::{Path, Query, State},
    response::Response,
};

use crate::AppState;
use crate::routes::common::{invalid, is_valid_id, proxy};
use crate::upstream::OriginRequest;

use super::model::TeamQuery;

/// 联赛基本信息
#[axum::debug_handler]
pub async fn league(State(state): State<AppState>, Path(league_id): Path<String>) -> Response {
    let league_id = league_id.trim().to_string();
    let request = OriginRequest::League {
        league_id: league_id.clone(),
    };
    if !is_valid_id(&league_id) {
        return invalid(&request, "league id must be numeric");
    }
    proxy(&state.fixtures, request).await
}

/// 联赛的全部赛季
#[axum::debug_handler]
pub async fn seasons(State(state): State<AppState>, Path(league_id): Path<String>) -> Response {
    let league_id = league_id.trim().to_string();
    let request = OriginRequest::LeagueSeasons {
        league_id: league_id.clone(),
    };
    if !is_valid_id(&league_id) {
        return invalid(&request, "league id must be numeric");
    }
    proxy(&state.fixtures, request).await
}

#[axum::debug_handler]
pub async fn search_teams(
    State(state): State<AppState>,
    Query(query): Query<TeamQuery>,
) -> Response {
    match query.name() {
        Ok(name) => proxy(&state.fixtures, OriginRequest::TeamSearch { name }).await,
        Err(reason) => invalid(
            &OriginRequest::TeamSearch {
                name: String::new(),
            },
            &reason,
        ),
    }
}
