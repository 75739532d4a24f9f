// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;
    use tempfile::TempDir;
    use tempfile::tempdir;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::cmd::serve::server::start_server;
    use crate::collection::DATABASE_FILE;
    use crate::db::Database;
    use crate::error::Fallible;
    use crate::types::card::Card;

    async fn spawn_server() -> Fallible<(TempDir, String)> {
        let dir = tempdir()?;
        let directory = dir.path().display().to_string();
        let port = portpicker::pick_unused_port().unwrap();
        spawn(async move { start_server(Some(directory), Some(port), true).await });
        loop {
            if let Ok(stream) = TcpStream::connect(("127.0.0.1", port)).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        Ok((dir, format!("http://127.0.0.1:{port}")))
    }

    async fn post_form(url: &str, form: &[(&str, &str)]) -> Fallible<String> {
        let response = reqwest::Client::new()
            .post(format!("{url}/"))
            .form(form)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        Ok(response.text().await.unwrap())
    }

    #[tokio::test]
    async fn test_start_server_on_non_existent_directory() -> Fallible<()> {
        let result = start_server(Some("./derpherp".to_string()), Some(1), true).await;
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
        Ok(())
    }

    #[tokio::test]
    async fn test_static_routes() -> Fallible<()> {
        let (_dir, url) = spawn_server().await?;

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("{url}/style.css")).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the not found endpoint.
        let response = reqwest::get(format!("{url}/herp-derp")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let (dir, url) = spawn_server().await?;

        // Hit the root endpoint: every card is available.
        let response = reqwest::get(format!("{url}/")).await.unwrap();
        assert!(response.status().is_success());
        let html = response.text().await.unwrap();
        for card in Card::ALL {
            assert!(html.contains(card.label()));
        }
        assert!(html.contains("ریست هفته"));
        assert!(!html.contains("disabled"));

        // Use a card: it is disabled and highlighted once.
        let html = post_form(&url, &[("action", "Use"), ("card", "baba")]).await?;
        assert_eq!(html.matches("disabled").count(), 1);
        assert!(html.contains("glow"));

        let db_path = dir.path().join(DATABASE_FILE);
        let db = Database::new(db_path.to_str().unwrap())?;
        assert_eq!(db.get_item(Card::Baba.label())?, Some("used".to_string()));

        // The highlight does not survive a reload.
        let html = reqwest::get(format!("{url}/")).await.unwrap().text().await.unwrap();
        assert_eq!(html.matches("disabled").count(), 1);
        assert!(!html.contains("glow"));

        // Using the same card again changes nothing.
        let html = post_form(&url, &[("action", "Use"), ("card", "baba")]).await?;
        assert_eq!(html.matches("disabled").count(), 1);
        assert!(!html.contains("glow"));

        let html = post_form(&url, &[("action", "Use"), ("card", "dadash")]).await?;
        assert_eq!(html.matches("disabled").count(), 2);

        // Reset.
        let html = post_form(&url, &[("action", "Reset")]).await?;
        assert!(!html.contains("disabled"));
        assert_eq!(db.get_item(Card::Baba.label())?, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_use_without_card() -> Fallible<()> {
        let (_dir, url) = spawn_server().await?;
        let html = post_form(&url, &[("action", "Use")]).await?;
        assert!(!html.contains("disabled"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_action() -> Fallible<()> {
        let (_dir, url) = spawn_server().await?;
        let response = reqwest::Client::new()
            .post(format!("{url}/"))
            .form(&[("action", "Fly")])
            .send()
            .await
            .unwrap();
        assert!(response.status().is_client_error());
        Ok(())
    }
}
