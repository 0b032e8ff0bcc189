use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::ids::PlayerId;
use crate::error::AppError;
use crate::errors::ErrorCode;

pub const PLAYER_HEADER: &str = "X-Player-Id";

/// Player identity supplied by the caller in `X-Player-Id`. It is trusted
/// as-is; use `Option<ActingPlayer>` where a viewer is optional.
#[derive(Debug, Clone)]
pub struct ActingPlayer(pub PlayerId);

impl FromRequest for ActingPlayer {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(value) = req.headers().get(PLAYER_HEADER) else {
            return ready(Err(AppError::bad_request(
                ErrorCode::MissingPlayer,
                format!("{PLAYER_HEADER} header is required"),
            )));
        };
        let result = value
            .to_str()
            .map_err(|_| {
                AppError::bad_request(
                    ErrorCode::InvalidPlayer,
                    format!("{PLAYER_HEADER} must be visible ASCII"),
                )
            })
            .and_then(|raw| {
                PlayerId::parse(raw)
                    .map_err(|e| AppError::bad_request(ErrorCode::InvalidPlayer, e.detail()))
            })
            .map(ActingPlayer);
        ready(result)
    }
}
