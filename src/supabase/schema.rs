//! Typed rows for the `public` schema.
//!
//! Each table has a `Row` (what selects return), an `Insert` (required
//! columns plain, defaulted columns optional) and an `Update` (every
//! column optional). Optional insert/update fields are omitted from the
//! JSON body when `None`.

use serde::{Deserialize, Serialize};

/// A table in the `public` schema.
pub trait Table: for<'de> Deserialize<'de> + Serialize {
    const NAME: &'static str;
    type Insert: Serialize;
    type Update: Serialize + Default;
}

macro_rules! table {
    (
        $(#[$meta:meta])*
        $name:literal => $row:ident, $insert:ident, $update:ident {
            required { $( $(#[$rattr:meta])* $req:ident : $req_ty:ty ),* $(,)? }
            defaulted { $( $(#[$dattr:meta])* $def:ident : $def_ty:ty ),* $(,)? }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $row {
            $( $(#[$rattr])* pub $req: $req_ty, )*
            $( $(#[$dattr])* #[serde(default)] pub $def: $def_ty, )*
        }

        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub struct $insert {
            $( $(#[$rattr])* pub $req: $req_ty, )*
            $(
                $(#[$dattr])*
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $def: Option<$def_ty>,
            )*
        }

        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        pub struct $update {
            $(
                $(#[$rattr])*
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $req: Option<$req_ty>,
            )*
            $(
                $(#[$dattr])*
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $def: Option<$def_ty>,
            )*
        }

        impl Table for $row {
            const NAME: &'static str = $name;
            type Insert = $insert;
            type Update = $update;
        }
    };
}

table! {
    /// A published article.
    "article" => Article, ArticleInsert, ArticleUpdate {
        required {
            id: i64,
            category_id: i64,
            profile_id: i64,
            slug: String,
            title: String,
            content: String,
            thumbnail: String,
        }
        defaulted {
            date_created: Option<String>,
        }
    }
}

table! {
    /// An article saved by a profile.
    "bookmark" => Bookmark, BookmarkInsert, BookmarkUpdate {
        required {
            id: i64,
            article_id: i64,
            profile_id: i64,
        }
        defaulted {
            date_created: Option<String>,
        }
    }
}

table! {
    "category" => Category, CategoryInsert, CategoryUpdate {
        required {
            id: i64,
            slug: String,
            title: String,
            thumbnail: String,
        }
        defaulted {}
    }
}

table! {
    "comment" => Comment, CommentInsert, CommentUpdate {
        required {
            id: i64,
            article_id: i64,
            profile_id: i64,
            comment: String,
        }
        defaulted {
            date_created: Option<String>,
        }
    }
}

table! {
    "like" => Like, LikeInsert, LikeUpdate {
        required {
            id: i64,
            article_id: i64,
            profile_id: i64,
        }
        defaulted {
            date_created: Option<String>,
        }
    }
}

table! {
    /// A message from one profile to another about an article.
    "notification" => Notification, NotificationInsert, NotificationUpdate {
        required {
            id: i64,
            article_id: i64,
            sender_id: i64,
            // column name is misspelled in the database
            #[serde(rename = "reciver_id")]
            receiver_id: i64,
            message: String,
            #[serde(rename = "type")]
            kind: String,
        }
        defaulted {
            is_read: bool,
            date_created: Option<String>,
        }
    }
}

table! {
    "profile" => Profile, ProfileInsert, ProfileUpdate {
        required {
            id: i64,
            name: String,
            role: String,
            job: String,
            country: String,
            biography: String,
            image: String,
        }
        defaulted {}
    }
}
