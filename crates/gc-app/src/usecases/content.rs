//! Program, recommendation, learning and gamification screens.
//!
//! Pass-through reads plus the two writes these screens make.

use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use gc_core::content::{
    GamificationDashboard, LearnDashboard, Medal, Program, Recommendation, RecommendationPatch,
    RecommendationStatus,
};
use gc_core::ports::{ApiResult, ContentApiPort};

pub struct GetMyProgram {
    content_api: Arc<dyn ContentApiPort>,
}

impl GetMyProgram {
    pub fn new(content_api: Arc<dyn ContentApiPort>) -> Self {
        Self { content_api }
    }

    pub async fn execute(&self) -> ApiResult<Program> {
        self.content_api.my_program().await
    }
}

pub struct ListRecommendations {
    content_api: Arc<dyn ContentApiPort>,
}

impl ListRecommendations {
    pub fn new(content_api: Arc<dyn ContentApiPort>) -> Self {
        Self { content_api }
    }

    pub async fn all(&self) -> ApiResult<Vec<Recommendation>> {
        self.content_api.recommendations().await
    }

    /// Server-ordered by priority.
    pub async fn prioritized(&self) -> ApiResult<Vec<Recommendation>> {
        self.content_api.prioritized_recommendations().await
    }
}

pub struct UpdateRecommendation {
    content_api: Arc<dyn ContentApiPort>,
}

impl UpdateRecommendation {
    pub fn new(content_api: Arc<dyn ContentApiPort>) -> Self {
        Self { content_api }
    }

    pub async fn execute(&self, id: u64, patch: &RecommendationPatch) -> ApiResult<Recommendation> {
        let span = info_span!("usecase.update_recommendation.execute", id);
        async {
            let updated = self.content_api.update_recommendation(id, patch).await?;
            info!(status = ?updated.status, "recommendation updated");
            Ok(updated)
        }
        .instrument(span)
        .await
    }

    pub async fn set_status(&self, id: u64, status: RecommendationStatus) -> ApiResult<Recommendation> {
        let patch = RecommendationPatch {
            status: Some(status),
            ..Default::default()
        };
        self.execute(id, &patch).await
    }

    pub async fn set_favorite(&self, id: u64, favorite: bool) -> ApiResult<Recommendation> {
        let patch = RecommendationPatch {
            is_favorite: Some(favorite),
            ..Default::default()
        };
        self.execute(id, &patch).await
    }
}

pub struct GetLearnDashboard {
    content_api: Arc<dyn ContentApiPort>,
}

impl GetLearnDashboard {
    pub fn new(content_api: Arc<dyn ContentApiPort>) -> Self {
        Self { content_api }
    }

    pub async fn execute(&self) -> ApiResult<LearnDashboard> {
        self.content_api.learn_dashboard().await
    }
}

pub struct MarkArticleRead {
    content_api: Arc<dyn ContentApiPort>,
}

impl MarkArticleRead {
    pub fn new(content_api: Arc<dyn ContentApiPort>) -> Self {
        Self { content_api }
    }

    pub async fn execute(&self, article_id: u64) -> ApiResult<()> {
        self.content_api.mark_article_read(article_id).await?;
        info!(article_id, "article marked read");
        Ok(())
    }
}

pub struct GetGamification {
    content_api: Arc<dyn ContentApiPort>,
}

impl GetGamification {
    pub fn new(content_api: Arc<dyn ContentApiPort>) -> Self {
        Self { content_api }
    }

    pub async fn dashboard(&self) -> ApiResult<GamificationDashboard> {
        self.content_api.gamification_dashboard().await
    }

    pub async fn all_medals(&self) -> ApiResult<Vec<Medal>> {
        self.content_api.all_medals().await
    }
}
