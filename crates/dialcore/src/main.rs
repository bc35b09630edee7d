use clap::{Parser, Subcommand};
use dialcore::SOCKET_PATH;
use dialcore::protocol::Command;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "dialctl", version, about = "Control a running degree dial", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path of the daemon's control socket
    #[arg(short = 's', long, default_value = SOCKET_PATH)]
    socket: String,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Animate the dial to a value (clamped to its range)
    Set {
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },
    /// Animate the dial back to its configured initial value
    Reset,
    /// Print the dial's current value
    Get,
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Set { value } => Command::Set(value),
            Commands::Reset => Command::Reset,
            Commands::Get => Command::Get,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let command = Command::from(cli.command);
    let mut stream = connect(&cli.socket)?;
    log::debug!("Sending '{}' to {}", command, cli.socket);
    writeln!(stream, "{}", command)?;

    if command == Command::Get {
        let mut reply = String::new();
        BufReader::new(&stream).read_line(&mut reply)?;
        let reply = reply.trim();
        if reply.is_empty() {
            anyhow::bail!("Daemon closed the connection without answering");
        }
        println!("{}", reply);
    }
    Ok(())
}

fn connect(path: &str) -> anyhow::Result<UnixStream> {
    UnixStream::connect(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to degree daemon at {}: {}. Is degree running?",
            path,
            e
        )
    })
}
