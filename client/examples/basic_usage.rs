use std::process::exit;

use nitman_client::{Client, ClientConfig, ClientError, ErrorDetails};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn report(err: &ClientError) {
    eprintln!("Request failed (status {}): {}", err.status(), err.message());
    match err.details() {
        Some(ErrorDetails::Json(body)) => eprintln!("  Body: {}", body),
        Some(ErrorDetails::Text(body)) => eprintln!("  Body: {}", body),
        Some(ErrorDetails::Failure(cause)) => eprintln!("  Cause: {:?}", cause),
        None => {}
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nitman_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The base URL may be passed as the first argument,
    // otherwise NITMAN_API_BASE_URL and friends are used
    let config = match std::env::args().nth(1) {
        Some(base_url) => Ok(ClientConfig::new(base_url)),
        None => ClientConfig::from_env(),
    };
    let config = config.unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        exit(1);
    });

    let client = Client::from_config(&config).unwrap_or_else(|e| {
        report(&e);
        exit(1);
    });

    // List users
    match client.list_users().await {
        Ok(list) => {
            println!("{} users", list.count);
            for user in &list.users {
                println!("- {}: {}", user.id, user.name);
            }
        }
        Err(err) => report(&err),
    }

    // Fetch one that probably does not exist
    match client.get_user(999).await {
        Ok(user) => println!("User 999: {}", user.name),
        Err(err) => report(&err),
    }

    // Blog posts
    match client.list_posts().await {
        Ok(posts) => {
            for post in &posts {
                println!(
                    "- {} by {}",
                    post.title,
                    post.author_name.as_deref().unwrap_or("unknown")
                );
            }
        }
        Err(err) => report(&err),
    }
}
