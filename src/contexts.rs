use serde::Serialize;

#[derive(Serialize)]
pub struct HeaderContext<'a> {
    pub compiler: &'a str,
    pub cflags: &'a str,
    pub ldflags: &'a str,
    pub ldlibs: &'a str,
    pub deps: &'a [String],
    pub target: &'a str,
    pub objects: Vec<&'a str>,
    pub build_dir: &'a str,
}

#[derive(Serialize)]
pub struct ObjectContext<'a> {
    pub object: &'a str,
    pub source: &'a str,
}

#[derive(Serialize)]
pub struct FlagContext {
    pub usage: String,
    pub description: &'static str,
}

#[derive(Serialize)]
pub struct UsageContext<'a> {
    pub program: &'a str,
    pub flags: Vec<FlagContext>,
}
