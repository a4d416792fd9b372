//! Canned Entra ID and Resource Manager responses.

use mockito::{Matcher, Mock};

use super::test_context::{TENANT_ID, TestContext};

pub(crate) const SCOPE: &str = "/subscriptions/sub-1/resourceGroups/rg-demo/providers/Microsoft.MachineLearningServices/workspaces/proj-default";
pub(crate) const AI_DEVELOPER_ROLE_ID: &str = "/subscriptions/sub-1/providers/Microsoft.Authorization/roleDefinitions/64702f94-c441-49e6-a78b-ef80e0188fee";
pub(crate) const READER_ROLE_ID: &str = "/subscriptions/sub-1/providers/Microsoft.Authorization/roleDefinitions/acdd72a7-3385-48ef-bd42-f606fba81ae7";
pub(crate) const USER_ID: &str = "3f2504e0-4f89-11d3-9a0c-0305e82c3301";
pub(crate) const ARM_TOKEN: &str = "arm-token";

/// Identifier flags matching `SCOPE`.
pub(crate) const PROJECT_ARGS: [&str; 6] =
    ["-s", "sub-1", "-g", "rg-demo", "-p", "proj-default"];

impl TestContext {
    pub(crate) fn mock_token(&mut self) -> Mock {
        self.server
            .mock("POST", format!("/{}/oauth2/v2.0/token", TENANT_ID).as_str())
            .match_body(Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"token_type":"Bearer","expires_in":3599,"access_token":"{}"}}"#,
                ARM_TOKEN
            ))
            .create()
    }

    pub(crate) fn mock_workspace(&mut self) -> Mock {
        self.server
            .mock("GET", SCOPE)
            .match_query(Matcher::UrlEncoded("api-version".into(), "2024-04-01".into()))
            .match_header("authorization", format!("Bearer {}", ARM_TOKEN).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"id":"{}","name":"proj-default","location":"eastus","kind":"Project"}}"#,
                SCOPE
            ))
            .create()
    }

    pub(crate) fn mock_workspace_missing(&mut self) -> Mock {
        self.server
            .mock("GET", SCOPE)
            .match_query(Matcher::Any)
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"code":"ResourceNotFound","message":"The Resource 'Microsoft.MachineLearningServices/workspaces/proj-default' under resource group 'rg-demo' was not found."}}"#)
            .create()
    }

    /// Assignments for `USER_ID` at `SCOPE`, one per role definition ID.
    pub(crate) fn mock_assignments(&mut self, role_definition_ids: &[&str]) -> Mock {
        let value = role_definition_ids
            .iter()
            .enumerate()
            .map(|(i, def)| {
                format!(
                    r#"{{"id":"{scope}/providers/Microsoft.Authorization/roleAssignments/a{i}","name":"a{i}","properties":{{"roleDefinitionId":"{def}","principalId":"{user}","principalType":"User","scope":"{scope}"}}}}"#,
                    scope = SCOPE,
                    i = i,
                    def = def,
                    user = USER_ID
                )
            })
            .collect::<Vec<_>>()
            .join(",");

        self.server
            .mock("GET", format!("{}/providers/Microsoft.Authorization/roleAssignments", SCOPE).as_str())
            .match_query(Matcher::UrlEncoded(
                "$filter".into(),
                format!("principalId eq '{}'", USER_ID),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"value":[{}]}}"#, value))
            .create()
    }

    pub(crate) fn mock_definition(&mut self, id: &str, role_name: &str) -> Mock {
        self.server
            .mock("GET", id)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"id":"{}","properties":{{"roleName":"{}","type":"BuiltInRole"}}}}"#,
                id, role_name
            ))
            .create()
    }

    /// Role definitions named `role_name` at `SCOPE`.
    pub(crate) fn mock_definitions_by_name(&mut self, role_name: &str, ids: &[&str]) -> Mock {
        self.definitions_by_name(role_name, ids).create()
    }

    /// Same as `mock_definitions_by_name`, asserting it is never called.
    pub(crate) fn mock_definitions_by_name_unused(&mut self, role_name: &str) -> Mock {
        self.definitions_by_name(role_name, &[]).expect(0).create()
    }

    pub(crate) fn mock_create(&mut self, status: usize, body: &str) -> Mock {
        self.create_assignment(status, body).create()
    }

    /// A create endpoint asserting no assignment is attempted.
    pub(crate) fn mock_create_unused(&mut self) -> Mock {
        self.create_assignment(201, "{}").expect(0).create()
    }

    fn definitions_by_name(&mut self, role_name: &str, ids: &[&str]) -> Mock {
        let value = ids
            .iter()
            .map(|id| {
                format!(r#"{{"id":"{}","properties":{{"roleName":"{}"}}}}"#, id, role_name)
            })
            .collect::<Vec<_>>()
            .join(",");

        self.server
            .mock("GET", format!("{}/providers/Microsoft.Authorization/roleDefinitions", SCOPE).as_str())
            .match_query(Matcher::UrlEncoded(
                "$filter".into(),
                format!("roleName eq '{}'", role_name),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"value":[{}]}}"#, value))
    }

    fn create_assignment(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock(
                "PUT",
                Matcher::Regex(format!(
                    "^{}/providers/Microsoft.Authorization/roleAssignments/[0-9a-f-]{{36}}$",
                    regex_escape(SCOPE)
                )),
            )
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "properties": {
                    "roleDefinitionId": AI_DEVELOPER_ROLE_ID,
                    "principalId": USER_ID,
                    "principalType": "User"
                }
            })))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
    }
}

fn regex_escape(value: &str) -> String {
    value.replace('.', "\\.")
}
