//! Server implementation

#![warn(missing_docs)]

mod http;

use std::thread;

use hotel_core::{Config, RequestHandler};
use tracing_subscriber::EnvFilter;

/// Command line options
#[derive(Debug)]
struct Opts {
    /// Configuration of the reservation system
    config: Config,

    /// Port for the HTTP server to listen on
    port: u16,
    /// Host for the HTTP server to listen on
    host: String,
    /// Number of request handler threads
    threads: u32,
}

impl Opts {
    fn from_args() -> Self {
        let mut opts = Opts {
            port: 8080,
            host: String::from("127.0.0.1"),
            config: Config { rooms_per_type: 10 },
            threads: 8,
        };

        let mut option: Option<String> = None;
        for arg in std::env::args().skip(1) {
            if let Some(opt) = option {
                match opt.as_str() {
                    "-port" => opts.port = arg.parse().expect("-port takes a decimal u16"),
                    "-host" => opts.host = arg,
                    "-threads" => {
                        opts.threads = arg.parse().expect("-threads takes a decimal u32")
                    }
                    "-rooms-per-type" => {
                        opts.config.rooms_per_type =
                            arg.parse().expect("-rooms-per-type takes a decimal u32")
                    }
                    _ => {
                        eprintln!("Error: ignoring unknown option {opt}");
                        std::process::exit(1);
                    }
                }
                option = None;
            } else {
                option = Some(arg);
            }
        }
        if let Some(opt) = option {
            eprintln!("Error: ignoring leftover option {opt}");
            std::process::exit(1);
        }

        opts
    }
}

fn http_loop<H: RequestHandler>(server: &tiny_http::Server, handler: &H) {
    loop {
        let rq = server.recv().expect("HTTP receive failed");
        if let Some(rq) = http::parse(rq) {
            handler.handle(rq);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let opts = Opts::from_args();

    let server = tiny_http::Server::http((opts.host.as_str(), opts.port))
        .expect("failed to bind HTTP server");
    tracing::info!(
        host = %opts.host,
        port = opts.port,
        rooms_per_type = opts.config.rooms_per_type,
        "listening"
    );

    let desk = hotel_desk::launch(&opts.config);

    thread::scope(|s| {
        for i in 0..opts.threads {
            thread::Builder::new()
                .name(format!("handler_{i}"))
                .spawn_scoped(s, || http_loop(&server, &desk))
                .unwrap();
        }
    });
}
