use crate::events::{AppEvent, SharedValue};
use async_channel::Sender;
use dialcore::SOCKET_PATH;
use dialcore::protocol::Command;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;

pub async fn run_server(tx: Sender<AppEvent>, current: SharedValue) {
    // Cleanup old socket if it exists
    if fs_err::metadata(SOCKET_PATH).is_ok() {
        let _ = fs_err::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };
    log::info!("Listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                let current = current.clone();
                tokio::spawn(async move {
                    let (reader, writer) = stream.into_split();
                    serve(BufReader::new(reader), writer, tx, current).await;
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Handles one client: `get` is answered in place, everything else goes to the GUI.
async fn serve<R, W>(reader: R, mut writer: W, tx: Sender<AppEvent>, current: SharedValue)
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Get) => {
                let reply = format!("{}\n", *current.read());
                if writer.write_all(reply.as_bytes()).await.is_err() {
                    break;
                }
            }
            Ok(command) => {
                if tx.send(AppEvent::Command(command)).await.is_err() {
                    break;
                }
            }
            Err(e) => log::warn!("Ignoring '{}': {}", line.trim(), e),
        }
    }
}
