//! Resource lifecycle surface for a host plugin framework
//!
//! The host calls configure once, then one create/read/update/delete at a
//! time per resource. Each resource kind implements [`ManagedResource`];
//! read-only kinds implement [`DataSource`].

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::error::{Result, ThetaError};
use crate::theta::deployments::Deployment;
use crate::theta::endpoints::Endpoint;
use crate::theta::organizations::Organization;
use crate::theta::projects::Project;
use crate::theta::session::Credentials;
use crate::theta::templates::Template;
use crate::theta::{ClientConfig, ThetaClient};

/// How a kind applies configuration changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStrategy {
    /// The backend accepts a PUT of the new document
    InPlace,
    /// The backend cannot mutate; delete then create
    Replace,
}

/// Result of refreshing local state from the server
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<T> {
    Present(T),
    /// Resource no longer exists; the host should drop it from state
    Gone,
}

/// CRUD operations of one resource kind
#[async_trait]
pub trait ManagedResource: Send + Sync {
    /// Planned configuration in, state out
    type Model: Clone + Send + Sync;

    const TYPE_NAME: &'static str;
    const UPDATE_STRATEGY: UpdateStrategy;

    async fn create(&self, client: &ThetaClient, plan: &Self::Model) -> Result<Self::Model>;

    /// Full refresh from the server; `NotFound` when the resource is gone
    async fn read(&self, client: &ThetaClient, prior: &Self::Model) -> Result<Self::Model>;

    async fn update(
        &self,
        client: &ThetaClient,
        prior: &Self::Model,
        plan: &Self::Model,
    ) -> Result<Self::Model>;

    /// Delete; a resource that is already gone counts as deleted
    async fn delete(&self, client: &ThetaClient, prior: &Self::Model) -> Result<()>;
}

/// Read-only listing exposed to the host
#[async_trait]
pub trait DataSource: Send + Sync {
    type Query: Send + Sync;
    type Model: Send;

    const TYPE_NAME: &'static str;

    async fn read(&self, client: &ThetaClient, query: &Self::Query) -> Result<Vec<Self::Model>>;
}

/// Read a resource, mapping `NotFound` to [`ReadOutcome::Gone`]
pub async fn refresh<R: ManagedResource>(
    resource: &R,
    client: &ThetaClient,
    prior: &R::Model,
) -> Result<ReadOutcome<R::Model>> {
    match resource.read(client, prior).await {
        Ok(model) => Ok(ReadOutcome::Present(model)),
        Err(e) if e.is_not_found() => {
            warn!("{} no longer exists ({}); removing from state", R::TYPE_NAME, e);
            Ok(ReadOutcome::Gone)
        }
        Err(e) => Err(e),
    }
}

fn ignore_missing(result: Result<()>) -> Result<()> {
    match result {
        Err(ThetaError::NotFound { kind, id }) => {
            debug!("{} '{}' already deleted", kind, id);
            Ok(())
        }
        other => other,
    }
}

/// Provider configuration entry point
pub struct Provider;

impl Provider {
    /// Build a client and log in; an auth failure aborts configuration
    pub async fn configure(config: ClientConfig, credentials: &Credentials) -> Result<ThetaClient> {
        let mut client = ThetaClient::new(config);
        client.authenticate(credentials).await?;
        info!("Provider configured for {}", credentials.principal());
        Ok(client)
    }
}

/// `theta_deployment`: list-scan read, replaced on every update
pub struct DeploymentResource;

#[async_trait]
impl ManagedResource for DeploymentResource {
    type Model = Deployment;

    const TYPE_NAME: &'static str = "theta_deployment";
    const UPDATE_STRATEGY: UpdateStrategy = UpdateStrategy::Replace;

    async fn create(&self, client: &ThetaClient, plan: &Deployment) -> Result<Deployment> {
        let plan = Deployment {
            project_id: client.resolve_project_id(Some(&plan.project_id))?,
            ..plan.clone()
        };
        client.create_deployment(&plan).await
    }

    async fn read(&self, client: &ThetaClient, prior: &Deployment) -> Result<Deployment> {
        let project_id = client.resolve_project_id(Some(&prior.project_id))?;
        let current = client.get_deployment(&project_id, &prior.id).await?;
        Ok(current.preserve_unechoed(prior))
    }

    async fn update(
        &self,
        client: &ThetaClient,
        prior: &Deployment,
        plan: &Deployment,
    ) -> Result<Deployment> {
        info!("Replacing deployment '{}'", prior.id);
        self.delete(client, prior).await?;
        self.create(client, plan).await
    }

    async fn delete(&self, client: &ThetaClient, prior: &Deployment) -> Result<()> {
        let project_id = client.resolve_project_id(Some(&prior.project_id))?;
        ignore_missing(client.delete_deployment(&project_id, &prior.id).await)
    }
}

/// `theta_endpoint`: direct read, updated in place
pub struct EndpointResource;

#[async_trait]
impl ManagedResource for EndpointResource {
    type Model = Endpoint;

    const TYPE_NAME: &'static str = "theta_endpoint";
    const UPDATE_STRATEGY: UpdateStrategy = UpdateStrategy::InPlace;

    async fn create(&self, client: &ThetaClient, plan: &Endpoint) -> Result<Endpoint> {
        let plan = Endpoint {
            project_id: client.resolve_project_id(Some(&plan.project_id))?,
            ..plan.clone()
        };
        client.create_endpoint(&plan).await
    }

    async fn read(&self, client: &ThetaClient, prior: &Endpoint) -> Result<Endpoint> {
        let project_id = client.resolve_project_id(Some(&prior.project_id))?;
        let current = client.get_endpoint(&project_id, &prior.id).await?;
        Ok(current.preserve_unechoed(prior))
    }

    async fn update(
        &self,
        client: &ThetaClient,
        prior: &Endpoint,
        plan: &Endpoint,
    ) -> Result<Endpoint> {
        let prior = Endpoint {
            project_id: client.resolve_project_id(Some(&prior.project_id))?,
            ..prior.clone()
        };
        client.update_endpoint(&prior, plan).await
    }

    async fn delete(&self, client: &ThetaClient, prior: &Endpoint) -> Result<()> {
        let project_id = client.resolve_project_id(Some(&prior.project_id))?;
        ignore_missing(client.delete_endpoint(&project_id, &prior.id).await)
    }
}

/// `theta_deployment_template`
pub struct TemplateResource;

#[async_trait]
impl ManagedResource for TemplateResource {
    type Model = Template;

    const TYPE_NAME: &'static str = "theta_deployment_template";
    const UPDATE_STRATEGY: UpdateStrategy = UpdateStrategy::InPlace;

    async fn create(&self, client: &ThetaClient, plan: &Template) -> Result<Template> {
        let plan = Template {
            project_id: client.resolve_project_id(Some(&plan.project_id))?,
            ..plan.clone()
        };
        client.create_template(&plan).await
    }

    async fn read(&self, client: &ThetaClient, prior: &Template) -> Result<Template> {
        let project_id = client.resolve_project_id(Some(&prior.project_id))?;
        let mut current = client.get_template(&project_id, &prior.id).await?;
        if current.project_id.is_empty() {
            current.project_id = project_id;
        }
        Ok(current)
    }

    async fn update(
        &self,
        client: &ThetaClient,
        prior: &Template,
        plan: &Template,
    ) -> Result<Template> {
        let project_id = match plan.project_id.as_str() {
            "" => client.resolve_project_id(Some(&prior.project_id))?,
            id => id.to_string(),
        };
        let plan = Template {
            project_id: project_id.clone(),
            ..plan.clone()
        };
        let mut updated = client.update_template(&prior.id, &plan).await?;
        if updated.project_id.is_empty() {
            updated.project_id = project_id;
        }
        Ok(updated)
    }

    async fn delete(&self, client: &ThetaClient, prior: &Template) -> Result<()> {
        let project_id = client.resolve_project_id(Some(&prior.project_id))?;
        ignore_missing(client.delete_template(&project_id, &prior.id).await)
    }
}

/// `theta_project`
pub struct ProjectResource;

#[async_trait]
impl ManagedResource for ProjectResource {
    type Model = Project;

    const TYPE_NAME: &'static str = "theta_project";
    const UPDATE_STRATEGY: UpdateStrategy = UpdateStrategy::InPlace;

    async fn create(&self, client: &ThetaClient, plan: &Project) -> Result<Project> {
        let plan = Project {
            org_id: client.resolve_organization_id(Some(&plan.org_id))?,
            ..plan.clone()
        };
        client.create_project(&plan).await
    }

    async fn read(&self, client: &ThetaClient, prior: &Project) -> Result<Project> {
        let org_id = client.resolve_organization_id(Some(&prior.org_id))?;
        client.get_project(&org_id, &prior.id).await
    }

    async fn update(&self, client: &ThetaClient, prior: &Project, plan: &Project) -> Result<Project> {
        let org_id = match plan.org_id.as_str() {
            "" => client.resolve_organization_id(Some(&prior.org_id))?,
            id => id.to_string(),
        };
        let plan = Project {
            org_id,
            ..plan.clone()
        };
        client.update_project(&prior.id, &plan).await
    }

    async fn delete(&self, client: &ThetaClient, prior: &Project) -> Result<()> {
        ignore_missing(client.delete_project(&prior.id).await)
    }
}

/// `theta_organizations` data source
pub struct OrganizationsData;

#[async_trait]
impl DataSource for OrganizationsData {
    type Query = ();
    type Model = Organization;

    const TYPE_NAME: &'static str = "theta_organizations";

    async fn read(&self, client: &ThetaClient, _query: &()) -> Result<Vec<Organization>> {
        client.list_organizations().await
    }
}

/// `theta_deployment_templates` data source, queried by project id
pub struct TemplatesData;

#[async_trait]
impl DataSource for TemplatesData {
    type Query = String;
    type Model = Template;

    const TYPE_NAME: &'static str = "theta_deployment_templates";

    async fn read(&self, client: &ThetaClient, project_id: &String) -> Result<Vec<Template>> {
        client.list_templates(project_id).await
    }
}
