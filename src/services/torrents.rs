use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{Torrent, TORRENT_STATUS_KEYS},
    services::providers::TorrentDaemon,
};

/// Opens a web session; called once at startup
pub async fn login(daemon: &dyn TorrentDaemon, password: &str) -> AppResult<()> {
    let accepted = daemon.call("auth.login", vec![json!(password)]).await?;

    if accepted.as_bool() != Some(true) {
        return Err(AppError::Rpc("Deluge rejected the web password".to_string()));
    }

    tracing::info!(provider = "deluge", "Authenticated to Deluge");
    Ok(())
}

pub async fn list_torrents(daemon: &dyn TorrentDaemon) -> AppResult<Vec<Torrent>> {
    let statuses = daemon
        .call(
            "core.get_torrents_status",
            vec![json!({}), json!(TORRENT_STATUS_KEYS)],
        )
        .await?;

    let Value::Object(by_id) = statuses else {
        return Err(AppError::MalformedRecord(
            "core.get_torrents_status did not return an object".to_string(),
        ));
    };

    by_id
        .into_iter()
        .map(|(id, status)| {
            let mut torrent: Torrent = serde_json::from_value(status).map_err(|e| {
                AppError::MalformedRecord(format!("torrent {}: {}", id, e))
            })?;
            torrent.id = id;
            Ok(torrent)
        })
        .collect()
}

pub async fn pause(daemon: &dyn TorrentDaemon, torrent_id: &str) -> AppResult<()> {
    daemon
        .call("core.pause_torrent", vec![json!([torrent_id])])
        .await?;
    tracing::info!(torrent_id = %torrent_id, "Torrent paused");
    Ok(())
}

/// Removes a torrent, optionally deleting the downloaded data too
pub async fn remove(daemon: &dyn TorrentDaemon, torrent_id: &str, remove_data: bool) -> AppResult<()> {
    let removed = daemon
        .call(
            "core.remove_torrent",
            vec![json!(torrent_id), json!(remove_data)],
        )
        .await?;

    if removed.as_bool() != Some(true) {
        return Err(AppError::NotFound(format!("Torrent not found: {}", torrent_id)));
    }

    tracing::info!(torrent_id = %torrent_id, remove_data = remove_data, "Torrent removed");
    Ok(())
}

/// Adds a torrent from a magnet URI and returns its id
pub async fn add_magnet(daemon: &dyn TorrentDaemon, magnet_link: &str) -> AppResult<String> {
    let magnet_link = magnet_link.trim();
    if !magnet_link.starts_with("magnet:?") {
        return Err(AppError::InvalidInput(
            "Expected a magnet:? link".to_string(),
        ));
    }

    let result = daemon
        .call("core.add_torrent_magnet", vec![json!(magnet_link), json!({})])
        .await?;

    match result.as_str() {
        Some(torrent_id) => {
            tracing::info!(torrent_id = %torrent_id, "Torrent added");
            Ok(torrent_id.to_string())
        }
        None => Err(AppError::Conflict("Torrent was not added".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockTorrentDaemon;

    #[tokio::test]
    async fn test_login_accepted() {
        let mut daemon = MockTorrentDaemon::new();
        daemon
            .expect_call()
            .withf(|method, params| method == "auth.login" && params == &vec![json!("secret")])
            .returning(|_, _| Ok(json!(true)));

        assert!(login(&daemon, "secret").await.is_ok());
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let mut daemon = MockTorrentDaemon::new();
        daemon.expect_call().returning(|_, _| Ok(json!(false)));

        assert!(matches!(login(&daemon, "wrong").await, Err(AppError::Rpc(_))));
    }

    #[tokio::test]
    async fn test_list_torrents_sets_ids() {
        let mut daemon = MockTorrentDaemon::new();
        daemon
            .expect_call()
            .withf(|method, _| method == "core.get_torrents_status")
            .returning(|_, _| {
                Ok(json!({
                    "abc123": {"name": "Night of the Living Dead", "state": "Seeding", "progress": 100.0},
                    "def456": {"name": "Nosferatu", "state": "Paused", "progress": 12.5}
                }))
            });

        let torrents = list_torrents(&daemon).await.unwrap();

        assert_eq!(torrents.len(), 2);
        assert_eq!(torrents[0].id, "abc123");
        assert_eq!(torrents[0].state, "Seeding");
        assert_eq!(torrents[1].id, "def456");
        assert_eq!(torrents[1].progress, 12.5);
    }

    #[tokio::test]
    async fn test_list_torrents_unexpected_shape() {
        let mut daemon = MockTorrentDaemon::new();
        daemon.expect_call().returning(|_, _| Ok(json!([])));

        assert!(matches!(
            list_torrents(&daemon).await,
            Err(AppError::MalformedRecord(_))
        ));
    }

    #[tokio::test]
    async fn test_pause_wraps_id_in_list() {
        let mut daemon = MockTorrentDaemon::new();
        daemon
            .expect_call()
            .withf(|method, params| method == "core.pause_torrent" && params == &vec![json!(["abc123"])])
            .times(1)
            .returning(|_, _| Ok(Value::Null));

        assert!(pause(&daemon, "abc123").await.is_ok());
    }

    #[tokio::test]
    async fn test_remove_unknown_torrent() {
        let mut daemon = MockTorrentDaemon::new();
        daemon
            .expect_call()
            .withf(|_, params| params == &vec![json!("zzz"), json!(false)])
            .returning(|_, _| Ok(json!(false)));

        assert!(matches!(
            remove(&daemon, "zzz", false).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_add_magnet_returns_id() {
        let mut daemon = MockTorrentDaemon::new();
        daemon
            .expect_call()
            .withf(|method, _| method == "core.add_torrent_magnet")
            .returning(|_, _| Ok(json!("f00d")));

        let id = add_magnet(&daemon, "magnet:?xt=urn:btih:f00d").await.unwrap();
        assert_eq!(id, "f00d");
    }

    #[tokio::test]
    async fn test_add_magnet_rejects_other_links() {
        let mut daemon = MockTorrentDaemon::new();
        daemon.expect_call().never();

        assert!(matches!(
            add_magnet(&daemon, "http://example.com/file.torrent").await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_add_magnet_duplicate() {
        let mut daemon = MockTorrentDaemon::new();
        daemon.expect_call().returning(|_, _| Ok(Value::Null));

        assert!(matches!(
            add_magnet(&daemon, "magnet:?xt=urn:btih:f00d").await,
            Err(AppError::Conflict(_))
        ));
    }
}
