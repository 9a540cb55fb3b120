// Simple dig style command line.
// dig [--server 1.1.1.1] [--type MX] {hostname}...
mod util;

use clap::Parser;
use ddnsr::clients::Resolver;
use ddnsr::Type;
use std::net::{IpAddr, SocketAddr};
use std::process;
use std::str::FromStr;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "dig")]
#[command(about = "Send DNS queries over UDP and print the replies")]
struct Args {
    /// Hostnames to query, one after another
    #[arg(required = true)]
    hostnames: Vec<String>,

    /// Server to query, on port 53
    #[arg(short, long, default_value = "1.1.1.1")]
    server: IpAddr,

    /// Record type to ask for (A, AAAA, MX, ...; ALL is the same as ANY)
    #[arg(short = 't', long = "type", default_value = "A", value_parser = parse_type)]
    rtype: Type,

    /// Clear the recursion desired flag
    #[arg(long)]
    no_recursive: bool,

    /// Seconds to wait for each reply
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Hex dump the request and reply datagrams
    #[arg(long)]
    raw: bool,
}

fn parse_type(s: &str) -> Result<Type, String> {
    Type::from_str(s).map_err(|_| format!("unknown record type '{}'", s))
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let server = SocketAddr::new(args.server, 53);

    let resolver = match Resolver::new(server, Duration::from_secs(args.timeout)) {
        Ok(resolver) => resolver.recursion_desired(!args.no_recursive),
        Err(e) => {
            eprintln!("{}: {}", server, e);
            process::exit(1);
        }
    };

    let mut failed = false;
    for host in &args.hostnames {
        let result = if args.raw {
            resolver.query_with_dump(host, args.rtype.into(), |label, buf| {
                println!("{}:", label);
                util::hexdump(buf);
                println!();
            })
        } else {
            resolver.query(host, args.rtype.into())
        };

        match result {
            Ok(reply) => println!("{}", reply),
            Err(e) => {
                eprintln!("{}: {}", host, e);
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
}
