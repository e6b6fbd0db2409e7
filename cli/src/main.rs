mod commands;
mod terminal;

use commands::{CommandLine, Commands, interfaces, ip, network, node};
use terminal::logging;

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg = commands.config();

    logging::init_logging(&cfg);

    match commands.command {
        Commands::Node(command) => node::run(command, &cfg),
        Commands::Ip(command) => ip::run(command, &cfg),
        Commands::Network(command) => network::run(command, &cfg),
        Commands::Interfaces => interfaces::run(&cfg),
    }
}
