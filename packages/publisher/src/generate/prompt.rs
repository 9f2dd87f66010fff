/// Build the instruction prompt for drafting an article about `title`.
pub fn build_article_prompt(title: &str) -> String {
    format!(
        "You are an expert article writer. Write a full, well-structured, SEO-friendly article \
         about the following topic. The output must be pure markdown content, \
         starting with a Level 1 header (# Title) followed by an introduction, \
         multiple Level 2 and 3 subheadings (## and ###) for structure, and a concluding paragraph. \
         Do not include any external links, YAML front matter, or code blocks in this draft.\n\n\
         Topic: {title}"
    )
}
