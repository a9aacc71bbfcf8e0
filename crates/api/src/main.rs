use genobench_airflow::AirflowConfig;
use genobench_inference::ProcessorConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    genobench_observability::init();

    let app = genobench_api::app::build_app(AirflowConfig::from_env(), ProcessorConfig::from_env());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
