pub mod aggregator;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod, Service};
use kube::{
    Api, Client,
    api::{ListParams, ObjectList},
};

use crate::error::{AppError, Result};

/// Read-only view of the cluster's control plane.
#[async_trait]
pub trait ClusterReader: Send + Sync {
    async fn list_pods(&self) -> Result<Vec<Pod>>;
    async fn list_services(&self) -> Result<Vec<Service>>;
    async fn list_nodes(&self) -> Result<Vec<Node>>;
    /// Cheapest round trip that proves the API server answers.
    async fn probe(&self) -> Result<()>;
}

pub struct KubeReader {
    client: Client,
}

impl KubeReader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the service account mounted into the pod.
    pub fn in_cluster() -> Result<Self> {
        let config = kube::Config::incluster()
            .map_err(|e| AppError::Config(format!("loading in-cluster config: {}", e)))?;
        let client = Client::try_from(config)
            .map_err(|e| AppError::Config(format!("creating kubernetes client: {}", e)))?;
        Ok(Self::new(client))
    }

    /// Builds a client from kubeconfig or the environment.
    pub async fn inferred() -> Result<Self> {
        let client = Client::try_default()
            .await
            .map_err(|e| AppError::Config(format!("creating kubernetes client: {}", e)))?;
        Ok(Self::new(client))
    }

    async fn list_all<K>(&self, params: &ListParams) -> Result<ObjectList<K>>
    where
        K: kube::Resource<DynamicType = ()>
            + Clone
            + serde::de::DeserializeOwned
            + std::fmt::Debug,
    {
        let api: Api<K> = Api::all(self.client.clone());
        Ok(api.list(params).await?)
    }
}

#[async_trait]
impl ClusterReader for KubeReader {
    async fn list_pods(&self) -> Result<Vec<Pod>> {
        Ok(self.list_all::<Pod>(&ListParams::default()).await?.items)
    }

    async fn list_services(&self) -> Result<Vec<Service>> {
        Ok(self.list_all::<Service>(&ListParams::default()).await?.items)
    }

    async fn list_nodes(&self) -> Result<Vec<Node>> {
        Ok(self.list_all::<Node>(&ListParams::default()).await?.items)
    }

    async fn probe(&self) -> Result<()> {
        self.list_all::<Namespace>(&ListParams::default().limit(1))
            .await
            .map(|_| ())
    }
}
