use crate::db::{PlayerStore, StoreResult};
use crate::models::Player;

fn sample_players() -> Vec<Player> {
    vec![
        Player::new("Lionel Messi", "Forward", 36, "Inter Miami", 25, 12),
        Player::new("Cristiano Ronaldo", "Forward", 39, "Al Nassr", 28, 8),
        Player::new("Virgil van Dijk", "Defender", 32, "Liverpool", 3, 1),
        Player::new("Kevin De Bruyne", "Midfielder", 32, "Manchester City", 8, 15),
        Player::new("Alisson Becker", "Goalkeeper", 30, "Liverpool", 0, 0),
        Player::new("Kylian Mbappé", "Forward", 25, "PSG", 22, 7),
        Player::new("Luka Modrić", "Midfielder", 38, "Real Madrid", 5, 9),
        Player::new("Sergio Ramos", "Defender", 37, "Sevilla", 4, 2),
        Player::new("Robert Lewandowski", "Forward", 35, "Barcelona", 20, 6),
        Player::new("Thibaut Courtois", "Goalkeeper", 31, "Real Madrid", 0, 0),
        Player::new("Erling Haaland", "Forward", 23, "Manchester City", 31, 4),
        Player::new("Joshua Kimmich", "Midfielder", 28, "Bayern Munich", 7, 11),
    ]
}

/// Insert the sample roster when the store holds no players.
///
/// Returns how many players were inserted (0 if the store was not empty).
pub async fn seed_if_empty(store: &dyn PlayerStore) -> StoreResult<usize> {
    if store.count().await? > 0 {
        tracing::info!("Players already present, skipping sample data.");
        return Ok(0);
    }

    let players = sample_players();
    let inserted = players.len();

    // One save per player, in order, so ids follow the list.
    for player in players {
        store.save(player).await?;
    }

    tracing::info!("Sample data initialized with {} players", inserted);

    Ok(inserted)
}
