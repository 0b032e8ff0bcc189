use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::ids::ChannelId;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Channel named by the `{channel}` route segment.
#[derive(Debug, Clone)]
pub struct ChannelPath(pub ChannelId);

impl FromRequest for ChannelPath {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("channel") {
            None => Err(AppError::bad_request(
                ErrorCode::InvalidChannel,
                "Missing channel parameter",
            )),
            Some(raw) => ChannelId::parse(raw)
                .map(ChannelPath)
                .map_err(|e| AppError::bad_request(ErrorCode::InvalidChannel, e.detail())),
        };
        ready(result)
    }
}
