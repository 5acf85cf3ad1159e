#[tokio::main]
async fn main() -> anyhow::Result<()> {
    word_match_player::run().await
}
