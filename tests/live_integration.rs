use siteflow_http::{ClientOptions, RetryCondition, SiteflowClient, SiteflowConfig, SiteflowError};

fn load_live_config() -> Option<SiteflowConfig> {
    SiteflowConfig::from_env().ok()
}

#[tokio::test]
async fn live_list_and_missing_order() {
    let config = match load_live_config() {
        Some(config) => config,
        None => {
            eprintln!("skipping live test: SITEFLOW_TOKEN/SITEFLOW_SECRET not set");
            return;
        }
    };

    let client = SiteflowClient::new(config).with_options(
        ClientOptions::default()
            .with_retries(2)
            .with_retry_delay_ms(500)
            .with_retry_condition(RetryCondition::on_status(&[429, 502, 503, 504])),
    );

    let orders = client
        .orders()
        .get_all()
        .await
        .expect("listing orders must succeed with valid credentials");
    assert!(orders.is_object() || orders.is_array());

    let err = client
        .orders()
        .get("000000000000000000000000")
        .await
        .expect_err("unknown order must not resolve");
    match err {
        SiteflowError::Http { status, .. } => assert!((400..500).contains(&status)),
        SiteflowError::Application(_) => {}
        other => panic!("unexpected error for unknown order: {other:?}"),
    }
}
