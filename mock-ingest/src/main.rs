use std::net::SocketAddr;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    FmtSubscriber::builder()
        .with_env_filter("mock_ingest=debug")
        .init();

    tokio::task::spawn(async { mock_ingest::throughput_task().await });

    let addr: SocketAddr = "0.0.0.0:3100".parse().unwrap();
    println!("mock ingest endpoint listening on http://{addr}/ingest");
    mock_ingest::run(addr).await;
}
