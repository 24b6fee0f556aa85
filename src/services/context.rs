use sea_orm::DatabaseConnection;

use crate::{
    auth::providers::AuthProvider,
    config::LimitsConfig,
    db::dao::{DaoContext, RefreshTokenDao},
    services::{
        auth_service::AuthService, board_service::BoardService, card_service::CardService,
        list_service::ListService, ownership::OwnershipResolver, user_service::UserService,
    },
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
    limits: LimitsConfig,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
            limits: LimitsConfig::default(),
        }
    }

    pub fn with_limits(mut self, limits: LimitsConfig) -> Self {
        self.limits = limits;
        self
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db).with_limits(state.config.limits)
    }

    pub fn ownership(&self) -> OwnershipResolver {
        OwnershipResolver::new(self.daos.board(), self.daos.list(), self.daos.card())
    }

    pub fn board(&self) -> BoardService {
        BoardService::new(
            self.daos.board(),
            self.daos.list(),
            self.ownership(),
            self.limits,
        )
    }

    pub fn list(&self) -> ListService {
        ListService::new(self.daos.list(), self.daos.card(), self.ownership())
    }

    pub fn card(&self) -> CardService {
        CardService::new(
            self.daos.card(),
            self.daos.list(),
            self.ownership(),
            self.limits,
        )
    }

    pub fn user(&self) -> UserService {
        UserService::new(self.daos.user())
    }

    pub fn auth<'a>(&self, provider: &'a dyn AuthProvider) -> AuthService<'a> {
        AuthService::new(provider)
    }

    pub fn refresh_token_dao(&self) -> RefreshTokenDao {
        self.daos.refresh_token()
    }
}
