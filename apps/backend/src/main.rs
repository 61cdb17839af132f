#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quantdrill_backend::run().await
}
