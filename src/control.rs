use std::time::Duration;

use nng::{Aio, AioResult, Context, Protocol, Socket};

use crate::utils::SharedState;

const ADDRESS: &str = "tcp://127.0.0.1:54321";

/// Runs the command socket until the shared `running` flag clears.
///
/// A Rep0 socket listens on a fixed local address and accepts two commands,
/// `log start` and `log stop`, toggling database logging while the capture
/// loop keeps running.
pub fn serve(shared_state: SharedState) -> Result<(), nng::Error> {
    let socket = Socket::new(Protocol::Rep0)?;

    let ctx = Context::new(&socket)?;
    let ctx_clone = ctx.clone();
    let state = shared_state.clone();
    let aio = Aio::new(move |aio, res| handle(aio, &ctx_clone, res, &state))?;

    socket.listen(ADDRESS)?;
    ctx.recv(&aio)?;

    log::info!("control socket listening on {}", ADDRESS);

    while shared_state.lock().unwrap().running {
        std::thread::sleep(Duration::from_millis(100));
    }

    Ok(())
}

fn handle(aio: Aio, ctx: &Context, res: AioResult, shared_state: &SharedState) {
    match res {
        AioResult::Recv(Ok(msg)) => {
            let text = String::from_utf8_lossy(&msg);
            let reply = match text.trim() {
                "log start" => {
                    shared_state.lock().unwrap().logging_enabled = true;
                    log::info!("database logging enabled via control socket");
                    "ok"
                }
                "log stop" => {
                    shared_state.lock().unwrap().logging_enabled = false;
                    log::info!("database logging disabled via control socket");
                    "ok"
                }
                other => {
                    log::warn!("unknown control command: {}", other);
                    "unknown command"
                }
            };
            let _ = ctx.send(&aio, nng::Message::from(reply.as_bytes()));
        }
        AioResult::Recv(Err(err)) => {
            log::warn!("control socket receive failed: {}", err);
            let _ = ctx.recv(&aio);
        }
        AioResult::Send(_) => {
            // reply went out, wait for the next command
            let _ = ctx.recv(&aio);
        }
        AioResult::Sleep(_) => {}
    }
}
