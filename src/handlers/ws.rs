use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::Message;

use crate::state::AppState;
use crate::store::StoreState;
use crate::templates_structs::SnapshotMessage;

fn snapshot_message(state: &StoreState) -> String {
    serde_json::to_string(&SnapshotMessage::from(state)).unwrap_or_default()
}

/// WebSocket upgrade handler. Pushes one message per published snapshot,
/// starting with the current one.
pub async fn ws_connect(
    req: HttpRequest,
    body: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, mut ws_session, mut msg_stream) = actix_ws::handle(&req, body)?;

    let mut updates = state.store.watch();
    let initial = snapshot_message(&updates.borrow_and_update());

    actix_web::rt::spawn(async move {
        if ws_session.text(initial).await.is_err() {
            return;
        }
        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let msg = snapshot_message(&updates.borrow_and_update());
                    if ws_session.text(msg).await.is_err() {
                        break;
                    }
                }
                Some(Ok(msg)) = msg_stream.recv() => {
                    match msg {
                        Message::Ping(bytes) => {
                            if ws_session.pong(&bytes).await.is_err() {
                                break;
                            }
                        }
                        Message::Close(_) => break,
                        // The page only listens
                        _ => {}
                    }
                }
                else => break,
            }
        }
        let _ = ws_session.close(None).await;
    });

    Ok(response)
}
