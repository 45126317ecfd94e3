#[tokio::main]
async fn main() -> anyhow::Result<()> {
    practice_backend::run().await
}
