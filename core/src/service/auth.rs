use super::{accepted, TodolistService};
use crate::client::TodolistClient;
use crate::error::OperationError;
use crate::store::{AppAction, AuthAction, RequestStatus};
use crate::transport::Transport;
use crate::types::LoginParams;

impl<T: Transport> TodolistService<T> {
    pub async fn login(&self, params: &LoginParams) {
        let result = self.try_login(params).await;
        self.finish(result);
    }

    /// Clears the login flag once the server accepts the logout.
    pub async fn logout(&self) {
        let result = self.try_logout().await;
        self.finish(result);
    }

    /// Restore the session on startup. A rejected `me` just means nobody is
    /// logged in; only network failures are reported. The app is marked
    /// initialized either way.
    pub async fn initialize_app(&self) {
        let result = self.try_initialize_app().await;
        self.finish(result);
        self.finish(self.commit(AppAction::SetAppInitialized(true)));
    }

    async fn try_login(&self, params: &LoginParams) -> Result<(), OperationError> {
        self.set_status(RequestStatus::Loading)?;
        let request = self.client.build_login(params)?;
        let envelope = self.send(request, TodolistClient::parse_login).await?;
        let data = accepted(envelope)?;
        tracing::info!(user_id = data.user_id, "logged in");
        self.commit(AuthAction::SetIsLoggedIn(true))?;
        self.set_status(RequestStatus::Succeeded)
    }

    async fn try_logout(&self) -> Result<(), OperationError> {
        self.set_status(RequestStatus::Loading)?;
        let envelope = self
            .send(self.client.build_logout(), TodolistClient::parse_logout)
            .await?;
        accepted(envelope)?;
        self.commit(AuthAction::SetIsLoggedIn(false))?;
        self.set_status(RequestStatus::Succeeded)
    }

    async fn try_initialize_app(&self) -> Result<(), OperationError> {
        let envelope = self.send(self.client.build_me(), TodolistClient::parse_me).await?;
        if envelope.is_ok() {
            self.commit(AuthAction::SetIsLoggedIn(true))?;
        }
        Ok(())
    }
}
