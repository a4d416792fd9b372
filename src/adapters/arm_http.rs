//! Azure Resource Manager client implementation using reqwest.

use std::cell::RefCell;
use std::time::Duration;

use chrono::Utc;
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{
    AccessToken, AppError, ArmConfig, NewRoleAssignment, PrincipalType, ProjectRef,
    RoleAssignment, RoleDefinition, Workspace,
};
use crate::ports::{AuthorizationClient, TokenCredential, WorkspaceClient};

const DEFAULT_STATUS_MESSAGE: &str = "Azure Resource Manager request failed";

/// HTTP transport for the workspace and authorization management APIs.
///
/// One request per call, except list operations which follow `nextLink`
/// until the last page. The bearer token is fetched lazily and reused until
/// it nears expiry.
pub struct HttpArmClient {
    base_url: Url,
    token_scope: String,
    workspace_api_version: String,
    authorization_api_version: String,
    client: Client,
    credential: Box<dyn TokenCredential>,
    token: RefCell<Option<AccessToken>>,
}

impl std::fmt::Debug for HttpArmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpArmClient")
            .field("base_url", &self.base_url)
            .field("credential", &self.credential.name())
            .finish()
    }
}

impl HttpArmClient {
    pub fn new(config: &ArmConfig, credential: Box<dyn TokenCredential>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::arm(format!("Failed to create HTTP client: {}", e), None))?;

        Ok(Self {
            base_url: config.resource_manager_url.clone(),
            token_scope: config.token_scope.clone(),
            workspace_api_version: config.workspace_api_version.clone(),
            authorization_api_version: config.authorization_api_version.clone(),
            client,
            credential,
            token: RefCell::new(None),
        })
    }

    fn bearer(&self) -> Result<String, AppError> {
        let mut cached = self.token.borrow_mut();
        if let Some(token) = cached.as_ref().filter(|t| !t.is_expiring(Utc::now())) {
            return Ok(token.secret.clone());
        }
        let token = self.credential.get_token(&self.token_scope)?;
        tracing::debug!(credential = self.credential.name(), "acquired ARM access token");
        let secret = token.secret.clone();
        *cached = Some(token);
        Ok(secret)
    }

    /// Build `<base><resource_path>?api-version=..&<query>`.
    fn resource_url(
        &self,
        resource_path: &str,
        api_version: &str,
        query: &[(&str, &str)],
    ) -> Result<Url, AppError> {
        let raw = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            resource_path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| AppError::ParseError {
            what: "resource URL".into(),
            details: format!("{}: {}", raw, e),
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api-version", api_version);
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, AppError> {
        tracing::debug!(%method, %url, "ARM request");
        let bearer = self.bearer()?;
        Ok(self.client.request(method, url).header(AUTHORIZATION, format!("Bearer {}", bearer)))
    }

    fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AppError> {
        let response = builder
            .send()
            .map_err(|e| AppError::arm(format!("HTTP request failed: {}", e), None))?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "ARM response");

        if status.is_success() {
            return serde_json::from_str(&body_text).map_err(|e| {
                AppError::arm(format!("Failed to parse response: {}", e), Some(status.as_u16()))
            });
        }

        let (code, message) = extract_error(&body_text);
        let message = message.unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if let Some(reason) = status.canonical_reason() {
                reason.to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        Err(AppError::ArmApi { status: Some(status.as_u16()), code, message })
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        let builder = self.request(Method::GET, url)?;
        self.send(builder)
    }

    fn list_all<T: DeserializeOwned>(&self, first: Url) -> Result<Vec<T>, AppError> {
        let mut items = Vec::new();
        let mut next = Some(first);
        while let Some(url) = next.take() {
            let page: ListPage<T> = self.get_json(url)?;
            items.extend(page.value);
            if let Some(link) = page.next_link.filter(|l| !l.is_empty()) {
                next = Some(Url::parse(&link).map_err(|e| AppError::ParseError {
                    what: "nextLink".into(),
                    details: e.to_string(),
                })?);
            }
        }
        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPage<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
    #[serde(default)]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRoleAssignment {
    id: String,
    name: String,
    properties: ApiRoleAssignmentProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRoleAssignmentProperties {
    role_definition_id: String,
    principal_id: String,
    #[serde(default)]
    principal_type: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

impl From<ApiRoleAssignment> for RoleAssignment {
    fn from(api: ApiRoleAssignment) -> Self {
        RoleAssignment {
            id: api.id,
            name: api.name,
            scope: api.properties.scope.unwrap_or_default(),
            role_definition_id: api.properties.role_definition_id,
            principal_id: api.properties.principal_id,
            principal_type: api.properties.principal_type.as_deref().and_then(PrincipalType::parse),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiRoleDefinition {
    id: String,
    properties: ApiRoleDefinitionProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRoleDefinitionProperties {
    role_name: String,
}

impl From<ApiRoleDefinition> for RoleDefinition {
    fn from(api: ApiRoleDefinition) -> Self {
        RoleDefinition { id: api.id, role_name: api.properties.role_name }
    }
}

#[derive(Debug, Serialize)]
struct ApiCreateRequest<'a> {
    properties: ApiCreateProperties<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiCreateProperties<'a> {
    role_definition_id: &'a str,
    principal_id: &'a str,
    principal_type: &'static str,
}

/// Pull `error.code` / `error.message` out of an ARM error body.
fn extract_error(body: &str) -> (Option<String>, Option<String>) {
    if body.trim().is_empty() {
        return (None, None);
    }
    let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) else {
        return (None, None);
    };
    let error = parsed.get("error").unwrap_or(&parsed);
    let field = |name: &str| error.get(name).and_then(|v| v.as_str()).map(ToOwned::to_owned);
    (field("code"), field("message"))
}

fn quote_odata(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

impl WorkspaceClient for HttpArmClient {
    fn get_workspace(&self, project: &ProjectRef) -> Result<Workspace, AppError> {
        let path = format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.MachineLearningServices/workspaces/{}",
            project.subscription_id, project.resource_group, project.project_name
        );
        let url = self.resource_url(&path, &self.workspace_api_version, &[])?;
        self.get_json(url)
    }
}

impl AuthorizationClient for HttpArmClient {
    fn list_role_assignments(
        &self,
        scope: &str,
        principal_id: &str,
    ) -> Result<Vec<RoleAssignment>, AppError> {
        let path = format!("{}/providers/Microsoft.Authorization/roleAssignments", scope);
        let filter = format!("principalId eq {}", quote_odata(principal_id));
        let url =
            self.resource_url(&path, &self.authorization_api_version, &[("$filter", &filter)])?;
        let items: Vec<ApiRoleAssignment> = self.list_all(url)?;
        Ok(items.into_iter().map(RoleAssignment::from).collect())
    }

    fn get_role_definition(&self, role_definition_id: &str) -> Result<RoleDefinition, AppError> {
        let url = self.resource_url(role_definition_id, &self.authorization_api_version, &[])?;
        let definition: ApiRoleDefinition = self.get_json(url)?;
        Ok(definition.into())
    }

    fn find_role_definitions(
        &self,
        scope: &str,
        role_name: &str,
    ) -> Result<Vec<RoleDefinition>, AppError> {
        let path = format!("{}/providers/Microsoft.Authorization/roleDefinitions", scope);
        let filter = format!("roleName eq {}", quote_odata(role_name));
        let url =
            self.resource_url(&path, &self.authorization_api_version, &[("$filter", &filter)])?;
        let items: Vec<ApiRoleDefinition> = self.list_all(url)?;
        Ok(items.into_iter().map(RoleDefinition::from).collect())
    }

    fn create_role_assignment(
        &self,
        assignment: &NewRoleAssignment,
    ) -> Result<RoleAssignment, AppError> {
        let path = format!(
            "{}/providers/Microsoft.Authorization/roleAssignments/{}",
            assignment.scope, assignment.name
        );
        let url = self.resource_url(&path, &self.authorization_api_version, &[])?;
        let body = ApiCreateRequest {
            properties: ApiCreateProperties {
                role_definition_id: &assignment.role_definition_id,
                principal_id: &assignment.principal_id,
                principal_type: assignment.principal_type.as_str(),
            },
        };
        let builder = self
            .request(Method::PUT, url)?
            .header(CONTENT_TYPE, "application/json")
            .json(&body);
        let created: ApiRoleAssignment = self.send(builder)?;
        Ok(created.into())
    }
}
