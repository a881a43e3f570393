use crate::common::{INDEX_HTML, LOGO_PNG, SITE_CSS, TestApp, routes};
use webhoster::config::SitesConfig;

mod render {
    use super::*;

    #[tokio::test]
    async fn root_document_is_served_with_rewritten_links() {
        let app = TestApp::spawn().await;
        let token = app.token_for("alice");
        let id = app.create_site(&token).await;

        let res = app.get_without_token(&routes::site(&id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(
            res.header("content-type"),
            Some("text/html; charset=utf-8")
        );
        assert!(
            res.text
                .contains(&format!("href=\"/sites/{id}/css/site.css\""))
        );
        assert!(res.text.contains(&format!("src=\"/sites/{id}/img/logo.png\"")));
        assert!(res.text.contains("href=\"https://example.com\""));
    }

    #[tokio::test]
    async fn title_is_exposed_as_header() {
        let app = TestApp::spawn().await;
        let token = app.token_for("alice");
        let id = app.create_site(&token).await;

        let res = app.get_without_token(&routes::site(&id)).await;

        assert_eq!(res.header("x-website-title"), Some("Hello World"));
    }

    #[tokio::test]
    async fn html_is_sandboxed_by_default() {
        let app = TestApp::spawn().await;
        let token = app.token_for("alice");
        let id = app.create_site(&token).await;

        let res = app.get_without_token(&routes::site(&id)).await;

        let csp = res.header("content-security-policy").unwrap_or_default();
        assert!(csp.starts_with("sandbox"), "{csp}");
    }

    #[tokio::test]
    async fn sandbox_can_be_disabled() {
        let app = TestApp::spawn_with(
            SitesConfig {
                sandbox: false,
                ..Default::default()
            },
            1024 * 1024,
        )
        .await;
        let token = app.token_for("alice");
        let id = app.create_site(&token).await;

        let res = app.get_without_token(&routes::site(&id)).await;

        assert_eq!(res.status, 200);
        assert!(res.header("content-security-policy").is_none());
    }

    #[tokio::test]
    async fn unknown_site_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::site("ZZZZZZZZZZ")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod resources {
    use super::*;

    #[tokio::test]
    async fn files_are_served_byte_for_byte_with_content_type() {
        let app = TestApp::spawn().await;
        let token = app.token_for("alice");
        let id = app.create_site(&token).await;

        let css = app
            .get_without_token(&routes::site_file(&id, "css/site.css"))
            .await;
        assert_eq!(css.status, 200);
        assert_eq!(css.header("content-type"), Some("text/css"));
        assert_eq!(css.bytes, SITE_CSS);

        let png = app
            .get_without_token(&routes::site_file(&id, "img/logo.png"))
            .await;
        assert_eq!(png.status, 200);
        assert_eq!(png.header("content-type"), Some("image/png"));
        assert_eq!(png.bytes, LOGO_PNG);
    }

    #[tokio::test]
    async fn raw_root_document_is_not_rewritten() {
        let app = TestApp::spawn().await;
        let token = app.token_for("alice");
        let id = app.create_site(&token).await;

        let res = app
            .get_without_token(&routes::site_file(&id, "index.html"))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.bytes, INDEX_HTML);
    }

    #[tokio::test]
    async fn caching_headers_and_conditional_get() {
        let app = TestApp::spawn().await;
        let token = app.token_for("alice");
        let id = app.create_site(&token).await;
        let path = routes::site_file(&id, "css/site.css");

        let first = app.get_without_token(&path).await;
        assert_eq!(first.header("cache-control"), Some("public, max-age=3600"));
        let etag = first.header("etag").expect("etag header").to_string();

        let second = app.get_with_header(&path, "If-None-Match", &etag).await;
        assert_eq!(second.status, 304);
        assert!(second.bytes.is_empty());
    }

    #[tokio::test]
    async fn svg_is_served_sandboxed() {
        let app = TestApp::spawn().await;
        let token = app.token_for("alice");
        let svg: &[u8] = b"<svg xmlns=\"http://www.w3.org/2000/svg\"><script>alert(1)</script></svg>";
        let res = app
            .upload_site(&[("index.html", b"<p/>"), ("evil.svg", svg)], Some(&token))
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.id();

        let res = app.get_without_token(&routes::site_file(&id, "evil.svg")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.header("content-type"), Some("image/svg+xml"));
        let csp = res.header("content-security-policy").unwrap_or_default();
        assert!(csp.starts_with("sandbox"), "{csp}");
    }

    #[tokio::test]
    async fn raw_html_resource_is_sandboxed() {
        let app = TestApp::spawn().await;
        let token = app.token_for("alice");
        let id = app.create_site(&token).await;

        let res = app
            .get_without_token(&routes::site_file(&id, "index.html"))
            .await;

        let csp = res.header("content-security-policy").unwrap_or_default();
        assert!(csp.starts_with("sandbox"), "{csp}");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.token_for("alice");
        let id = app.create_site(&token).await;

        let res = app
            .get_without_token(&routes::site_file(&id, "missing.js"))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn encoded_traversal_is_not_found() {
        let app = TestApp::spawn().await;
        let alice = app.token_for("alice");
        let bob = app.token_for("bob");
        let id = app.create_site(&alice).await;
        app.create_site(&bob).await;

        let res = app
            .get_without_token(&routes::site_file(
                &id,
                "css%2F..%2F..%2F..%2Fbob%2Findex.html",
            ))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
