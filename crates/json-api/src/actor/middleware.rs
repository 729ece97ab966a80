//! Actor middleware.

use salvo::prelude::*;

use shareit_app::domain::users::records::UserId;

use crate::{actor::ACTOR_HEADER, extensions::*};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(actor) = extract_actor(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid X-Sharer-User-Id header"));
        ctrl.skip_rest();

        return;
    };

    depot.insert_actor(actor);

    ctrl.call_next(req, depot, res).await;
}

fn extract_actor(req: &Request) -> Option<UserId> {
    let value = req.headers().get(ACTOR_HEADER)?.to_str().ok()?;

    value.trim().parse::<i64>().ok().map(UserId::from_i64)
}
