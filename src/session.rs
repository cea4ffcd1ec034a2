use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    cookie::{CookieStore, Jar},
    Client, Url,
};
use std::{sync::Arc, time::Duration};

pub const BASE_URL: &str = "https://leetcode.com";
const LOGIN_PATH: &str = "/accounts/login/";
const LOGIN_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

/// Anything that can hand out cookies for an authenticated platform session.
#[async_trait]
pub trait CookieProvider: Send + Sync {
    async fn cookies(&self) -> Result<Vec<Cookie>>;
}

/// Cookies obtained elsewhere, e.g. copied from a browser.
#[derive(Debug, Clone)]
pub struct StaticCookies(Vec<Cookie>);

/// Logs in with a username and password through the login form.
#[derive(Debug, Clone)]
pub struct FormLogin {
    base: Url,
    username: String,
    password: String,
}

/// An HTTP client carrying the session cookies.
#[derive(Clone)]
pub struct Session {
    base: Url,
    client: Client,
    jar: Arc<Jar>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl StaticCookies {
    pub fn new(cookies: Vec<Cookie>) -> Self {
        Self(cookies)
    }
}

#[async_trait]
impl CookieProvider for StaticCookies {
    async fn cookies(&self) -> Result<Vec<Cookie>> {
        Ok(self.0.clone())
    }
}

impl FormLogin {
    pub fn new(base: Url, username: String, password: String) -> Self {
        Self {
            base,
            username,
            password,
        }
    }
}

#[async_trait]
impl CookieProvider for FormLogin {
    async fn cookies(&self) -> Result<Vec<Cookie>> {
        log::info!("logging in as {}", self.username);

        let base = &self.base;
        let login_url = base.join(LOGIN_PATH)?;
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(LOGIN_TIMEOUT)
            .build()?;

        if let Err(e) = client.get(login_url.clone()).send().await {
            log::warn!("failed to load login page: {}", e);
            return Ok(jar_cookies(&jar, base));
        }

        let csrf_token = jar_cookies(&jar, base)
            .into_iter()
            .find(|c| c.name == "csrftoken")
            .map(|c| c.value)
            .unwrap_or_default();
        log::debug!("csrf token present: {}", !csrf_token.is_empty());

        let params = [
            ("login", self.username.as_str()),
            ("password", self.password.as_str()),
            ("csrfmiddlewaretoken", csrf_token.as_str()),
        ];
        let response = client
            .post(login_url.clone())
            .header(reqwest::header::REFERER, login_url.as_str())
            .form(&params)
            .send()
            .await;

        match response {
            Ok(response) if !response.url().path().starts_with(LOGIN_PATH) => {
                log::info!("login successful");
            }
            Ok(response) => {
                log::warn!("login failed with status {}", response.status());
            }
            Err(e) => {
                log::warn!("login failed: {}", e);
            }
        }

        Ok(jar_cookies(&jar, base))
    }
}

impl Session {
    /// Builds a client with `cookies` set for the host of `base`.
    pub fn new(base: Url, cookies: &[Cookie]) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        for cookie in cookies {
            jar.add_cookie_str(
                &format!("{}={}; Path=/", cookie.name, cookie.value),
                &base,
            );
        }

        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .gzip(true)
            .build()?;

        Ok(Self { base, client, jar })
    }

    pub async fn authenticate(base: Url, provider: &dyn CookieProvider) -> Result<Self> {
        let cookies = provider.cookies().await?;
        log::debug!("session starts with {} cookies", cookies.len());
        Self::new(base, &cookies)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    #[cfg(test)]
    fn cookies(&self) -> Vec<Cookie> {
        jar_cookies(&self.jar, &self.base)
    }
}

pub fn base_url() -> Result<Url> {
    Url::parse(BASE_URL).context("invalid base url")
}

fn jar_cookies(jar: &Jar, url: &Url) -> Vec<Cookie> {
    jar.cookies(url)
        .and_then(|header| header.to_str().ok().map(parse_cookie_header))
        .unwrap_or_default()
}

pub fn parse_cookie_header(header: &str) -> Vec<Cookie> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .map(|(name, value)| Cookie::new(name, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        http::header,
        response::{IntoResponse, Redirect},
        routing::get,
        Form, Router,
    };
    use tokio::net::TcpListener;

    use super::*;

    async fn login_page() -> impl IntoResponse {
        ([(header::SET_COOKIE, "csrftoken=abc; Path=/")], "login")
    }

    async fn submit_login(Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
        let valid = form.get("csrfmiddlewaretoken").map(String::as_str) == Some("abc")
            && form.get("login").map(String::as_str) == Some("octocat")
            && form.get("password").map(String::as_str) == Some("secret");
        if valid {
            (
                [(header::SET_COOKIE, "LEETCODE_SESSION=token; Path=/")],
                Redirect::to("/"),
            )
                .into_response()
        } else {
            Redirect::to(LOGIN_PATH).into_response()
        }
    }

    async fn start_server() -> Url {
        let app = Router::new()
            .route(LOGIN_PATH, get(login_page).post(submit_login))
            .route("/", get(|| async { "home" }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        Url::parse(&format!("http://{}", addr)).unwrap()
    }

    #[test]
    fn parse_cookie_header_should_work() {
        let cookies = parse_cookie_header("csrftoken=abc; LEETCODE_SESSION=x=y;broken");
        assert_eq!(
            cookies,
            vec![
                Cookie::new("csrftoken", "abc"),
                Cookie::new("LEETCODE_SESSION", "x=y"),
            ]
        );
    }

    #[tokio::test]
    async fn static_cookies_should_load_into_session() {
        let provider = StaticCookies::new(vec![
            Cookie::new("LEETCODE_SESSION", "token"),
            Cookie::new("csrftoken", "csrf"),
        ]);

        let session = Session::authenticate(base_url().unwrap(), &provider)
            .await
            .unwrap();
        let cookies = session.cookies();

        assert_eq!(cookies.len(), 2);
        assert!(cookies.contains(&Cookie::new("LEETCODE_SESSION", "token")));
        assert!(cookies.contains(&Cookie::new("csrftoken", "csrf")));
    }

    #[test]
    fn empty_session_has_no_cookies() {
        let session = Session::new(base_url().unwrap(), &[]).unwrap();
        assert!(session.cookies().is_empty());
    }

    #[tokio::test]
    async fn form_login_should_collect_session_cookies() {
        let base = start_server().await;
        let login = FormLogin::new(base, "octocat".into(), "secret".into());

        let cookies = login.cookies().await.unwrap();
        assert!(cookies.contains(&Cookie::new("csrftoken", "abc")));
        assert!(cookies.contains(&Cookie::new("LEETCODE_SESSION", "token")));
    }

    #[tokio::test]
    async fn rejected_login_should_still_return_cookies() {
        let base = start_server().await;
        let login = FormLogin::new(base, "octocat".into(), "wrong".into());

        let cookies = login.cookies().await.unwrap();
        assert_eq!(cookies, vec![Cookie::new("csrftoken", "abc")]);
    }

    #[tokio::test]
    async fn unreachable_login_page_should_not_fail() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = Url::parse(&format!("http://{}", addr)).unwrap();
        let login = FormLogin::new(base, "octocat".into(), "secret".into());

        let cookies = login.cookies().await.unwrap();
        assert!(cookies.is_empty());
    }
}
