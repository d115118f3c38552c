use siteflow_http::{ClientOptions, RetryCondition, SiteflowClient, SiteflowError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = SiteflowClient::from_env()?.with_options(
        ClientOptions::default()
            .with_retries(3)
            .with_retry_delay_ms(1_000)
            .with_retry_condition(RetryCondition::on_status(&[429, 502, 503, 504])),
    );

    let orders = client.orders().get_all().await?;
    println!("{orders:#}");

    if let Some(id) = std::env::args().nth(1) {
        match client.orders().get(&id).await {
            Ok(order) => println!("{order:#}"),
            Err(SiteflowError::Application(error)) => eprintln!("api rejected request: {error}"),
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
