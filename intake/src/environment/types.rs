use intake_core_health_impl::HealthServiceImpl;
use intake_core_notification_impl::NotificationServiceImpl;
use intake_core_submission_impl::SubmissionServiceImpl;
use intake_email_impl::{template::TemplateEmailServiceImpl, EmailServiceImpl};
use intake_shared_impl::{rate_limit::RateLimitServiceImpl, time::TimeServiceImpl};
use intake_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = intake_api_rest::RestServer<HealthFeature, SubmissionFeature>;

// Cache
pub type Cache = crate::cache::Cache;

// Email
pub type Email = EmailServiceImpl;
pub type TemplateEmail = TemplateEmailServiceImpl<Email, Template>;

// Template
pub type Template = TemplateServiceImpl;

// Shared
pub type Time = TimeServiceImpl;
pub type RateLimit = RateLimitServiceImpl<Time, Cache>;

// Core
pub type HealthFeature = HealthServiceImpl<Time, Cache, Email>;
pub type NotificationFeature = NotificationServiceImpl<Time, TemplateEmail>;
pub type SubmissionFeature = SubmissionServiceImpl<RateLimit, NotificationFeature>;
