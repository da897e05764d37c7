//! Start-up catalogue seed.
//!
//! The package catalogue is fixed for the lifetime of the process; resources
//! and the introductory blog posts give the public site something to render
//! before an admin adds more.

use crate::models::content::{NewBlogPost, NewResource};
use crate::models::package::NewPackage;
use crate::store::{ContentStore, PackageStore, Store, StoreResult};

fn features(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The coaching packages offered on the site, in display order.
pub fn default_packages() -> Vec<NewPackage> {
    vec![
        NewPackage {
            id: "launchpad-student".into(),
            name: "Launchpad".into(),
            price: 2999,
            target_audience: "Students & Fresh Graduates".into(),
            description: "Find your first direction: clarity on roles, a sharp resume, and \
                          interview basics."
                .into(),
            features: features(&[
                "Career interest & aptitude assessment",
                "2 one-on-one coaching sessions",
                "Resume & LinkedIn makeover",
                "Mock interview with feedback",
                "30-day email support",
            ]),
            is_popular: false,
        },
        NewPackage {
            id: "ascend-professional".into(),
            name: "Ascend".into(),
            price: 6499,
            target_audience: "Early & Mid Career Professionals".into(),
            description: "Accelerate growth in your current track or land the next role with \
                          a structured plan."
                .into(),
            features: features(&[
                "In-depth strengths & values profiling",
                "4 one-on-one coaching sessions",
                "90-day career growth roadmap",
                "Salary negotiation preparation",
                "Personal brand & LinkedIn strategy",
                "60-day WhatsApp support",
            ]),
            is_popular: true,
        },
        NewPackage {
            id: "pivot-career-change".into(),
            name: "Pivot".into(),
            price: 9999,
            target_audience: "Career Changers".into(),
            description: "Move into a new field with a tested transition plan and \
                          accountability."
                .into(),
            features: features(&[
                "Transferable skills audit",
                "6 one-on-one coaching sessions",
                "Target industry research & mapping",
                "Networking & outreach scripts",
                "Portfolio / resume repositioning",
                "90-day accountability check-ins",
            ]),
            is_popular: false,
        },
        NewPackage {
            id: "summit-leadership".into(),
            name: "Summit".into(),
            price: 14999,
            target_audience: "Senior Professionals & Leaders".into(),
            description: "Executive coaching for leaders stepping into larger roles.".into(),
            features: features(&[
                "360-degree leadership assessment",
                "8 executive coaching sessions",
                "Leadership presence & communication",
                "Board-ready personal narrative",
                "Priority access for 6 months",
            ]),
            is_popular: false,
        },
    ]
}

fn default_resources() -> Vec<NewResource> {
    vec![
        NewResource {
            title: "Resume Checklist for Freshers".into(),
            description: "A one-page checklist to review your resume before applying.".into(),
            category: "resume".into(),
            resource_type: "pdf".into(),
            media_url: "/downloads/resume-checklist.pdf".into(),
        },
        NewResource {
            title: "Career Clarity Worksheet".into(),
            description: "Map your strengths, interests, and non-negotiables.".into(),
            category: "career-planning".into(),
            resource_type: "worksheet".into(),
            media_url: "/downloads/career-clarity-worksheet.pdf".into(),
        },
        NewResource {
            title: "Salary Negotiation Script".into(),
            description: "Word-for-word scripts for the offer conversation.".into(),
            category: "negotiation".into(),
            resource_type: "template".into(),
            media_url: "/downloads/salary-negotiation-script.pdf".into(),
        },
    ]
}

fn default_blog_posts() -> Vec<NewBlogPost> {
    vec![NewBlogPost {
        title: "Five Signs It's Time for a Career Change".into(),
        slug: "five-signs-career-change".into(),
        excerpt: "Restlessness is not always a reason to quit. These five signals are.".into(),
        content: "Feeling stuck is common. Before you resign, check whether you are \
                  outgrowing the role, the company, or the field itself..."
            .into(),
        category: "career-change".into(),
        image_url: None,
        is_published: true,
    }]
}

/// Populate an empty store with the catalogue.
pub async fn seed(store: &dyn Store) -> StoreResult<()> {
    for package in default_packages() {
        store.create_package(package).await?;
    }
    for resource in default_resources() {
        store.create_resource(resource).await?;
    }
    for post in default_blog_posts() {
        store.create_blog_post(post).await?;
    }
    tracing::info!("Catalogue seeded");
    Ok(())
}
