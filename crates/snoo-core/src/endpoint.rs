//! Listing endpoints.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};
use crate::query::{ListingOptions, QueryParams, Sort, build_query};
use crate::traits::Request;
use crate::types::{SubredditName, Username};

/// Section of a user's profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum UserSection {
    #[default]
    Overview,
    Submitted,
    Comments,
    Saved,
}

impl UserSection {
    pub fn as_str(self) -> &'static str {
        match self {
            UserSection::Overview => "overview",
            UserSection::Submitted => "submitted",
            UserSection::Comments => "comments",
            UserSection::Saved => "saved",
        }
    }
}

impl FromStr for UserSection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overview" => Ok(UserSection::Overview),
            "submitted" => Ok(UserSection::Submitted),
            "comments" => Ok(UserSection::Comments),
            "saved" => Ok(UserSection::Saved),
            _ => Err(InvalidInputError::Other {
                message: format!("unknown user section '{}'", s),
            }
            .into()),
        }
    }
}

/// Which subreddit directory to list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubredditSource {
    /// The authenticated user's subscriptions. Can be very long.
    Subscribed,
    Popular,
    New,
    Default,
}

impl SubredditSource {
    fn path(self) -> &'static str {
        match self {
            SubredditSource::Subscribed => "/subreddits/mine/subscriber.json",
            SubredditSource::Popular => "/subreddits/popular.json",
            SubredditSource::New => "/subreddits/new.json",
            SubredditSource::Default => "/subreddits/default.json",
        }
    }
}

impl FromStr for SubredditSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "subscribed" | "mine" => Ok(SubredditSource::Subscribed),
            "popular" => Ok(SubredditSource::Popular),
            "new" => Ok(SubredditSource::New),
            "default" => Ok(SubredditSource::Default),
            _ => Err(InvalidInputError::Other {
                message: format!("unknown subreddit source '{}'", s),
            }
            .into()),
        }
    }
}

/// A paginated collection the client can fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListingEndpoint {
    /// The front page (`/<sort>.json`).
    FrontPage { sort: Sort },
    /// A subreddit, or a `+`-joined multi (`/r/<name>/<sort>.json`).
    Subreddit { name: SubredditName, sort: Sort },
    /// A user's profile listing. The sort travels as a `sort` parameter.
    User {
        user: Username,
        section: UserSection,
        sort: Option<Sort>,
    },
    /// A subreddit directory.
    Subreddits(SubredditSource),
    /// Any other listing path. `.json` is appended when missing.
    Custom { path: String, sort: Option<Sort> },
}

impl ListingEndpoint {
    pub fn front_page(sort: Sort) -> Self {
        ListingEndpoint::FrontPage { sort }
    }

    pub fn subreddit(name: SubredditName, sort: Sort) -> Self {
        ListingEndpoint::Subreddit { name, sort }
    }

    pub fn user(user: Username, section: UserSection) -> Self {
        ListingEndpoint::User {
            user,
            section,
            sort: None,
        }
    }

    /// Request path, relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            ListingEndpoint::FrontPage { sort } => format!("/{}.json", sort),
            ListingEndpoint::Subreddit { name, sort } => {
                format!("/r/{}/{}.json", name.as_str(), sort)
            }
            ListingEndpoint::User { user, section, .. } => {
                format!("/user/{}/{}.json", user.as_str(), section.as_str())
            }
            ListingEndpoint::Subreddits(source) => source.path().to_string(),
            ListingEndpoint::Custom { path, .. } => {
                let path = path.trim_end_matches('/');
                let path = if path.starts_with('/') {
                    path.to_string()
                } else {
                    format!("/{}", path)
                };
                if path.ends_with(".json") {
                    path
                } else {
                    format!("{}.json", path)
                }
            }
        }
    }

    /// Sort that drives the query overlay.
    pub fn sort(&self) -> Option<Sort> {
        match self {
            ListingEndpoint::FrontPage { sort } | ListingEndpoint::Subreddit { sort, .. } => {
                Some(*sort)
            }
            ListingEndpoint::User { sort, .. } | ListingEndpoint::Custom { sort, .. } => *sort,
            ListingEndpoint::Subreddits(_) => None,
        }
    }

    /// Query parameters for one page of this endpoint.
    pub fn query(&self, options: &ListingOptions) -> QueryParams {
        let mut params = build_query(options, self.sort());
        if let ListingEndpoint::User { sort: Some(sort), .. } = self {
            params.insert("sort", sort.as_str());
        }
        params
    }

    pub fn request(&self, options: &ListingOptions) -> Request {
        Request::get(self.path(), self.query(options))
    }
}

impl fmt::Display for ListingEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
