#[tokio::main]
async fn main() -> std::io::Result<()> {
    emskit::run().await
}
