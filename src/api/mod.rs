pub mod rss2json;
