//! Devicon classes for technology names.

/// Icon used when nothing in [`TECH_ICONS`] matches.
pub const DEFAULT_ICON: &str = "devicon-devicon-plain";

/// `(technology, devicon class)`, searched in order for fuzzy matches.
pub const TECH_ICONS: &[(&str, &str)] = &[
    ("React", "devicon-react-original colored"),
    ("Next.js", "devicon-nextjs-original"),
    ("TypeScript", "devicon-typescript-plain colored"),
    ("Tailwind CSS", "devicon-tailwindcss-plain colored"),
    ("Python", "devicon-python-original colored"),
    ("FastAPI", "devicon-fastapi-plain colored"),
    ("Go", "devicon-go-original-wordmark colored"),
    ("AWS", "devicon-amazonwebservices-plain-wordmark colored"),
    ("Docker", "devicon-docker-plain colored"),
    ("JavaScript", "devicon-javascript-plain colored"),
    ("Vue.js", "devicon-vuejs-plain colored"),
    ("Angular", "devicon-angularjs-plain colored"),
    ("Node.js", "devicon-nodejs-plain colored"),
    ("MongoDB", "devicon-mongodb-plain colored"),
    ("PostgreSQL", "devicon-postgresql-plain colored"),
    ("MySQL", "devicon-mysql-plain colored"),
    ("Redis", "devicon-redis-plain colored"),
    ("Git", "devicon-git-plain colored"),
    ("Linux", "devicon-linux-plain"),
    ("Ubuntu", "devicon-ubuntu-plain colored"),
    ("CSS3", "devicon-css3-plain colored"),
    ("HTML5", "devicon-html5-plain colored"),
    ("Sass", "devicon-sass-original colored"),
    ("Webpack", "devicon-webpack-plain colored"),
    ("Vite", "devicon-vitejs-plain colored"),
];

/// Icon class for `tech`.
///
/// An exact name wins. Otherwise the first entry whose lower-cased name
/// contains, or is contained in, the lower-cased `tech` is used, so
/// `"React Native"` maps to React and `"go"` to Go. A blank name gets the
/// default icon.
pub fn tech_icon(tech: &str) -> &'static str {
    if let Some((_, icon)) = TECH_ICONS.iter().find(|(name, _)| *name == tech) {
        return icon;
    }

    let normalized = tech.trim().to_lowercase();
    if normalized.is_empty() {
        return DEFAULT_ICON;
    }

    TECH_ICONS
        .iter()
        .find(|(name, _)| {
            let name = name.to_lowercase();
            name.contains(&normalized) || normalized.contains(&name)
        })
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}
