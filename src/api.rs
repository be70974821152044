use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, bail, Context};
use base64::{engine::general_purpose::STANDARD, Engine};
use jwch_utils::student_id::{Credentials, Password, StudentId};
use log::{debug, info, warn};
use md5::{Digest, Md5};
use reqwest::{header, redirect, RequestBuilder, StatusCode};
use reqwest_cookie_store::{CookieStore, CookieStoreMutex};
use scraper::Html;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    config::JwchConfig,
    constants::{
        JWCH_PREFIX, JWCH_REFERER, LOGIN_CHECK_URL, LOGIN_CHK_XS_URL, LOGIN_ORIGIN,
        SSO_HOST_URL, SSO_LOGIN_URL, USER_INFO_URL, VERIFY_CODE_URL,
    },
    parser::user::parse_student_number,
    session_store::{Identifier, SessionStore},
};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const EVALUATION_MARKER: &str = "请先对任课教师进行测评";
const GET_EXPIRED_MARKER: &str = "重新登录";
const POST_EXPIRED_MARKER: &str = "处理URL失败";

/// Conditions that callers are expected to tell apart, available via
/// [`anyhow::Error::downcast_ref`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("The session has expired.")]
    Expired,
    #[error("Teacher evaluation must be completed before this page can be viewed.")]
    EvaluationRequired,
    #[error("Logged in as {found:?}, but {expected:?} was expected.")]
    AccountConflict { expected: StudentId, found: String },
    #[error("The login check was rejected: {0}")]
    LoginCheckFailed(String),
    #[error("SSO login failed: {0}")]
    SsoLoginFailed(String),
    #[error("The session identifier was not found after logging in.")]
    IdentifierNotFound,
}

/// An HTTP client for the academic-affairs portal.
///
/// Cloning is cheap, and the clones share the cookie jar.
#[derive(Clone)]
pub struct JwchClient {
    reqwest: reqwest::Client,
    cookie_store: Arc<CookieStoreMutex>,
    identifier: Identifier,
    student_id: Option<StudentId>,
    captcha_endpoint: String,
}

impl JwchClient {
    pub async fn new(config: &JwchConfig) -> anyhow::Result<Self> {
        Self::with_cookie_store(config, CookieStore::new(None)).await
    }

    /// Creates a client that continues a previously exported session.
    pub async fn restore(config: &JwchConfig, session: &SessionStore) -> anyhow::Result<Self> {
        let cookie_store = if session.cookie_jar.is_empty() {
            CookieStore::new(None)
        } else {
            CookieStore::load_json_all(session.cookie_jar.as_bytes())
                .map_err(|e| anyhow!("Failed to load cookie jar: {e:#}"))?
        };
        let mut client = Self::with_cookie_store(config, cookie_store).await?;
        client.identifier = session.identifier.clone();
        client.student_id = session.student_id.clone();
        Ok(client)
    }

    async fn with_cookie_store(
        config: &JwchConfig,
        cookie_store: CookieStore,
    ) -> anyhow::Result<Self> {
        let cookie_store = Arc::new(CookieStoreMutex::new(cookie_store));
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_provider(Arc::clone(&cookie_store))
            .redirect(redirect::Policy::none())
            .http1_only()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(Duration::from_secs(config.timeout_secs));
        if config.proxy.enabled {
            let proxy = async {
                let server = config.proxy.resolve_server(&reqwest::Client::new()).await?;
                config.proxy.proxy_url(&server)
            };
            match proxy.await {
                Ok(url) => {
                    info!("Using proxy at {}", url.host_str().unwrap_or_default());
                    builder = builder.proxy(reqwest::Proxy::all(url)?);
                }
                Err(e) => warn!("Continuing without proxy: {e:#}"),
            }
        }
        Ok(Self {
            reqwest: builder.build()?,
            cookie_store,
            identifier: Identifier::default(),
            student_id: None,
            captcha_endpoint: config.captcha_endpoint.clone(),
        })
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn student_id(&self) -> Option<&StudentId> {
        self.student_id.as_ref()
    }

    /// Snapshot of the identifier and every cookie, including session cookies.
    pub fn export_session(&self) -> anyhow::Result<SessionStore> {
        let mut cookie_jar = vec![];
        self.cookie_store
            .lock()
            .map_err(|_| anyhow!("Cookie store was poisoned"))?
            .save_incl_expired_and_nonpersistent_json(&mut cookie_jar)
            .map_err(|e| anyhow!("Failed to serialize cookie jar: {e:#}"))?;
        Ok(SessionStore {
            student_id: self.student_id.clone(),
            identifier: self.identifier.clone(),
            cookie_jar: String::from_utf8(cookie_jar)?,
        })
    }

    fn clear_cookies(&self) -> anyhow::Result<()> {
        self.cookie_store
            .lock()
            .map_err(|_| anyhow!("Cookie store was poisoned"))?
            .clear();
        Ok(())
    }

    /// Logs in from scratch, replacing any previous session.
    pub async fn login(&mut self, credentials: &Credentials) -> anyhow::Result<()> {
        info!("Trying to log in as {}.", credentials.student_id);
        self.clear_cookies()?;
        self.identifier = Identifier::default();

        let captcha = self
            .reqwest
            .get(VERIFY_CODE_URL)
            .send()
            .await?
            .bytes()
            .await?;
        let verify_code = self.recognize_captcha(&captcha).await?;
        debug!("Recognized verify code {verify_code:?}");

        // The login check answers with a redirect carrying the SSO token.
        let response = self
            .reqwest
            .post(LOGIN_CHECK_URL)
            .header(header::REFERER, LOGIN_ORIGIN)
            .header(header::ORIGIN, LOGIN_ORIGIN)
            .form(&LoginForm::new(credentials, &verify_code))
            .send()
            .await?;
        let location = redirect_location(&response, LOGIN_CHECK_URL)
            .ok_or_else(|| SessionError::LoginCheckFailed(response.status().to_string()))?;
        let param = |name| {
            query_param(&location, name).ok_or_else(|| {
                SessionError::LoginCheckFailed(format!("`{name}` is missing in the redirect"))
            })
        };
        let (token, id, num) = (param("token")?, param("id")?, param("num")?);

        let response: SsoLoginResponse = self
            .reqwest
            .post(SSO_LOGIN_URL)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&[("token", &token)])
            .send()
            .await?
            .json()
            .await
            .context("Failed to parse SSO login response")?;
        if response.code != 200 {
            bail!(SessionError::SsoLoginFailed(response.info));
        }

        let response = self
            .reqwest
            .get(LOGIN_CHK_XS_URL)
            .header(header::REFERER, JWCH_REFERER)
            .header(header::ORIGIN, format!("{SSO_HOST_URL}/"))
            .query(&[
                ("id", id.as_str()),
                ("num", num.as_str()),
                ("ssourl", SSO_HOST_URL),
                ("hosturl", JWCH_PREFIX),
                ("ssologin", ""),
            ])
            .send()
            .await?;
        let identifier = redirect_location(&response, LOGIN_CHK_XS_URL)
            .and_then(|location| query_param(&location, "id"))
            .ok_or(SessionError::IdentifierNotFound)?;

        self.identifier = identifier.into();
        self.student_id = Some(credentials.student_id.clone());
        info!("Successfully logged in.");
        Ok(())
    }

    async fn recognize_captcha(&self, image: &[u8]) -> anyhow::Result<String> {
        let response: VerifyCodeResponse = self
            .reqwest
            .post(&self.captcha_endpoint)
            .form(&[("validateCode", captcha_data_uri(image))])
            .send()
            .await?
            .json()
            .await
            .context("Failed to parse captcha recognition response")?;
        Ok(response.message)
    }

    /// Makes sure the session is alive and belongs to the expected student.
    pub async fn check_session(&self) -> anyhow::Result<()> {
        if self.identifier.is_empty() {
            bail!(SessionError::Expired);
        }
        let html = self.get_with_identifier(USER_INFO_URL).await?;
        let found = parse_student_number(&html).ok_or(SessionError::Expired)?;
        match &self.student_id {
            Some(expected) if AsRef::<str>::as_ref(expected) != found => {
                bail!(SessionError::AccountConflict {
                    expected: expected.clone(),
                    found,
                })
            }
            _ => Ok(()),
        }
    }

    pub async fn get_with_identifier(&self, url: &str) -> anyhow::Result<Html> {
        Ok(Html::parse_document(
            &self.get_text_with_identifier(url).await?,
        ))
    }

    pub async fn post_with_identifier(
        &self,
        url: &str,
        form: &impl Serialize,
    ) -> anyhow::Result<Html> {
        Ok(Html::parse_document(
            self.post_text_with_identifier(url, form).await?.trim(),
        ))
    }

    pub async fn get_text_with_identifier(&self, url: &str) -> anyhow::Result<String> {
        let bytes = self.get_bytes_with_identifier(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn post_text_with_identifier(
        &self,
        url: &str,
        form: &impl Serialize,
    ) -> anyhow::Result<String> {
        let bytes = self.post_bytes_with_identifier(url, form).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Raw body, for pages that are not UTF-8.
    pub async fn get_bytes_with_identifier(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        self.send_checked(self.reqwest.get(url), GET_EXPIRED_MARKER)
            .await
            .with_context(|| format!("While fetching {url}"))
    }

    pub async fn post_bytes_with_identifier(
        &self,
        url: &str,
        form: &impl Serialize,
    ) -> anyhow::Result<Vec<u8>> {
        self.send_checked(self.reqwest.post(url).form(form), POST_EXPIRED_MARKER)
            .await
            .with_context(|| format!("While posting to {url}"))
    }

    /// Fetches a page that needs no session, such as the notice board.
    pub async fn get_public(&self, url: &Url) -> anyhow::Result<String> {
        let response = self.reqwest.get(url.clone()).send().await?;
        if !response.status().is_success() {
            bail!(
                "Unexpected error code: server returned {:?}",
                response.status()
            );
        }
        Ok(response.text().await?)
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(header::REFERER, JWCH_REFERER)
            .query(&[("id", self.identifier.as_str())])
    }

    async fn send_checked(
        &self,
        request: RequestBuilder,
        expired_marker: &str,
    ) -> anyhow::Result<Vec<u8>> {
        let response = self.authenticated(request).send().await?;
        let status = response.status();
        if status == StatusCode::FOUND {
            // The portal redirects to an error page, which tells an unfinished
            // teacher evaluation apart from an expired session.
            if let Some(location) = redirect_location(&response, JWCH_PREFIX) {
                debug!("Redirected to {location}");
                if let Ok(redirected) = self.authenticated(self.reqwest.get(location)).send().await
                {
                    if redirected.text().await?.contains(EVALUATION_MARKER) {
                        bail!(SessionError::EvaluationRequired);
                    }
                }
            }
            bail!(SessionError::Expired);
        }
        if !status.is_success() {
            bail!("Unexpected error code: server returned {status:?}");
        }

        let bytes = response.bytes().await?.to_vec();
        let text = String::from_utf8_lossy(&bytes);
        if text.contains(expired_marker) {
            bail!(SessionError::Expired);
        }
        if text.contains(EVALUATION_MARKER) {
            bail!(SessionError::EvaluationRequired);
        }
        Ok(bytes)
    }
}

fn redirect_location(response: &reqwest::Response, base: &str) -> Option<Url> {
    if !response.status().is_redirection() {
        return None;
    }
    let location = response.headers().get(header::LOCATION)?.to_str().ok()?;
    Url::parse(base).ok()?.join(location).ok()
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// The portal stores the middle 16 hex digits of the MD5 digest.
fn password_hash(password: &Password) -> String {
    let password: &str = password.as_ref();
    let digest = hex::encode(Md5::digest(password));
    digest[8..24].to_owned()
}

/// Encodes the captcha the way the recognition endpoint expects, with no `;` before
/// `base64`.
fn captcha_data_uri(image: &[u8]) -> String {
    format!("data:{}base64,{}", sniff_image_mime(image), STANDARD.encode(image))
}

fn sniff_image_mime(image: &[u8]) -> &'static str {
    match image {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'B', b'M', ..] => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Serialize)]
struct LoginForm<'a> {
    #[serde(rename = "Verifycode")]
    verify_code: &'a str,
    #[serde(rename = "muser")]
    student_id: &'a StudentId,
    #[serde(rename = "passwd")]
    password_hash: String,
}
impl<'a> LoginForm<'a> {
    fn new(credentials: &'a Credentials, verify_code: &'a str) -> Self {
        Self {
            verify_code,
            student_id: &credentials.student_id,
            password_hash: password_hash(&credentials.password),
        }
    }
}

#[derive(Deserialize)]
struct VerifyCodeResponse {
    message: String,
}

#[derive(Deserialize)]
struct SsoLoginResponse {
    code: i64,
    #[serde(default)]
    info: String,
}
