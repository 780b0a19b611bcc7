mod commands;
mod config;

use std::{net::SocketAddr, sync::Arc};

use config::GatewayConfig;
use slashgate_discord::DiscordRestClient;
use slashgate_framework::{CommandRegistry, ConnectionInfo, InteractionDispatcher};
use warp::{filters::path::FullPath, hyper::body::Bytes, reply::Response, Filter};

use warp::http::Response as WarpResponse;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = GatewayConfig::from_env().expect("expected a complete gateway configuration");

    let mut registry = CommandRegistry::new();
    registry.register("/ping", Box::new(commands::PingCommand));
    registry.register("/echo/:word", Box::new(commands::EchoCommand));
    registry.register("/greet/:name?title=", Box::new(commands::GreetCommand));
    let registry = Arc::new(registry);

    if config.serve_only {
        println!("SERVE_ONLY is set, skipping remote command registration");
    } else {
        let rest = DiscordRestClient::new(&config.token_prefix, &config.token);
        match registry
            .sync_remote(&rest, &config.application_id, config.guild_id.as_deref())
            .await
        {
            Ok(()) => println!("Registered {} commands with Discord", registry.len()),
            Err(e) => eprintln!("Failed to register commands: {e:?}"),
        }
    }

    let dispatcher = Arc::new(InteractionDispatcher::new(
        registry.clone(),
        &config.public_key,
    ));

    let root_route =
        warp::path::end().map(|| warp::reply::html("This is the slashgate interaction endpoint."));

    let webhook_path = config.webhook_path.clone();
    let webhook_route = warp::post()
        .and(warp::path::full())
        .and(warp::header::optional::<String>("x-signature-ed25519"))
        .and(warp::header::optional::<String>("x-signature-timestamp"))
        .and(warp::body::bytes())
        .and(warp::addr::remote())
        .map(move |path, signature, timestamp, body, remote| {
            (
                path,
                signature,
                timestamp,
                body,
                remote,
                dispatcher.clone(),
                webhook_path.clone(),
            )
        })
        .and_then(
            |(path, signature, timestamp, body, remote, dispatcher, webhook_path): (
                FullPath,
                Option<String>,
                Option<String>,
                Bytes,
                Option<SocketAddr>,
                Arc<InteractionDispatcher>,
                String,
            )| async move {
                if path.as_str() != webhook_path {
                    return Err(warp::reject::not_found());
                }

                let reply = dispatcher
                    .handle(
                        signature.as_deref(),
                        timestamp.as_deref(),
                        &body,
                        ConnectionInfo {
                            remote_addr: remote,
                        },
                    )
                    .await;

                Ok::<Response, warp::Rejection>(
                    WarpResponse::builder()
                        .status(reply.status)
                        .header("content-type", "application/json; charset=utf-8")
                        .body(reply.body.to_string().into())
                        .expect("Building WarpResponse failed"),
                )
            },
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    println!(
        "Serving interactions at http://{addr}{}",
        config.webhook_path
    );

    let routes = root_route.or(webhook_route);
    warp::serve(routes).run(addr).await;
}
