use html_fluent::{BatchPrepend, Child, Error, Html, Options, Page, Resolution};

fn ids(parent: &Html<'_>) -> Vec<String> {
    parent
        .children()
        .iter()
        .map(|c| c.get_id().unwrap_or_else(|| c.tag_name()))
        .collect()
}

fn named<'a>(page: &'a Page, tag: &str, id: &str) -> Html<'a> {
    let el = Html::new(page, tag).expect("valid tag");
    el.id(id).expect("fresh element");
    el
}

#[test]
fn append_to_and_prepend_to_return_the_child() {
    let page = Page::from_html(r#"<ul id="list"><li id="mid"></li></ul>"#);
    let first = named(&page, "li", "first");
    let last = named(&page, "li", "last");

    let returned = last.append_to("#list").expect("list exists");
    assert!(returned.same_element(&last));
    first.prepend_to("#list").expect("list exists");

    let list = page.qs("#list").expect("valid").expect("list");
    assert_eq!(ids(&list), ["first", "mid", "last"]);
}

#[test]
fn append_to_accepts_wrapper_and_element() {
    let page = Page::new();
    let parent = Html::new(&page, "div").expect("div");
    let a = named(&page, "p", "a");
    let b = named(&page, "p", "b");

    a.append_to(&parent).expect("wrapper target");
    b.append_to(parent.elm()).expect("element target");

    assert_eq!(ids(&parent), ["a", "b"]);
}

#[test]
fn append_to_missing_selector_fails() {
    let page = Page::new();
    let el = Html::new(&page, "div").expect("div");

    assert!(matches!(
        el.append_to("#nowhere"),
        Err(Error::InvalidReference(_))
    ));
    assert!(matches!(
        el.prepend_to("#nowhere"),
        Err(Error::InvalidReference(_))
    ));
    assert!(!el.is_attached());
}

#[test]
fn advisory_append_to_missing_selector_is_a_no_op() {
    let page = Page::new();
    let el = Html::new(&page, "div").expect("div");

    el.append_to_with("#nowhere", Resolution::Advisory)
        .expect("advisory skip")
        .text("chained");
    assert!(!el.is_attached());
    assert_eq!(el.get_text(), "chained".into());

    el.prepend_to_with("body", Resolution::Advisory)
        .expect("body exists");
    assert!(el.is_attached());
}

#[test]
fn append_tag_returns_new_wrapper() {
    let page = Page::new();
    let parent = Html::new(&page, "div").expect("div");

    let span = parent.append("span").expect("valid tag");
    assert!(!span.same_element(&parent));
    assert_eq!(span.tag_name(), "span");
    assert!(span.parent().expect("attached to parent").same_element(&parent));

    span.text("inside");
    assert_eq!(parent.get_html(), "<span>inside</span>".into());
}

#[test]
fn append_existing_returns_self() {
    let page = Page::new();
    let parent = Html::new(&page, "div").expect("div");
    let child = Html::new(&page, "em").expect("em");

    let returned = parent.append(&child).expect("existing element");
    assert!(returned.same_element(&parent));

    let raw = Html::new(&page, "b").expect("b");
    let returned = parent.append(raw.elm()).expect("raw element");
    assert!(returned.same_element(&parent));

    assert_eq!(ids(&parent), ["em", "b"]);
}

#[test]
fn append_existing_moves_the_element() {
    let page = Page::from_html(r#"<div id="a"><p id="p"></p></div><div id="b"></div>"#);
    let a = page.qs("#a").expect("valid").expect("a");
    let b = page.qs("#b").expect("valid").expect("b");
    let p = page.qs("#p").expect("valid").expect("p");

    b.append(&p).expect("move");
    assert!(a.children().is_empty());
    assert_eq!(ids(&b), ["p"]);
}

#[test]
fn append_selector_child_resolves_in_document() {
    let page = Page::from_html(r#"<aside><i id="icon"></i></aside><nav></nav>"#);
    let nav = page.qs("nav").expect("valid").expect("nav");

    nav.append(Child::Existing("#icon".into())).expect("icon exists");
    assert_eq!(ids(&nav), ["icon"]);

    assert!(matches!(
        nav.append(Child::Existing("#missing".into())),
        Err(Error::InvalidReference(_))
    ));
}

#[test]
fn prepend_tag_returns_new_wrapper() {
    let page = Page::from_html(r#"<ol id="o"><li id="x"></li></ol>"#);
    let list = page.qs("#o").expect("valid").expect("ol");

    let created = list.prepend("li").expect("valid tag");
    created.id("new").expect("fresh element");
    assert_eq!(ids(&list), ["new", "x"]);
}

#[test]
fn append_many_keeps_argument_order() {
    let page = Page::new();
    let parent = Html::new(&page, "div").expect("div");
    let a = named(&page, "p", "a");
    let b = named(&page, "p", "b");
    let c = named(&page, "p", "c");

    parent.append_many([&a, &b, &c]).expect("append");
    assert_eq!(ids(&parent), ["a", "b", "c"]);
}

#[test]
fn append_many_mixes_tags_and_elements() {
    let page = Page::new();
    let parent = Html::new(&page, "div").expect("div");
    let a = named(&page, "p", "a");

    parent
        .append_many([Child::from("hr"), Child::from(&a), Child::from("br")])
        .expect("append");
    assert_eq!(ids(&parent), ["hr", "a", "br"]);
}

#[test]
fn prepend_many_reverses_by_default() {
    let page = Page::new();
    let parent = Html::new(&page, "div").expect("div");
    parent.append(&named(&page, "p", "existing")).expect("seed");
    let a = named(&page, "p", "a");
    let b = named(&page, "p", "b");
    let c = named(&page, "p", "c");

    parent.prepend_many([&a, &b, &c]).expect("prepend");
    assert_eq!(ids(&parent), ["c", "b", "a", "existing"]);
}

#[test]
fn prepend_many_preserves_order_when_configured() {
    let page = Page::with_options(
        "",
        Options {
            batch_prepend: BatchPrepend::Preserve,
            ..Options::default()
        },
    );
    let parent = Html::new(&page, "div").expect("div");
    parent.append(&named(&page, "p", "existing")).expect("seed");
    let a = named(&page, "p", "a");
    let b = named(&page, "p", "b");
    let c = named(&page, "p", "c");

    parent.prepend_many([&a, &b, &c]).expect("prepend");
    assert_eq!(ids(&parent), ["a", "b", "c", "existing"]);
}

#[test]
fn append_many_stops_at_first_error() {
    let page = Page::new();
    let parent = Html::new(&page, "div").expect("div");

    let result = parent.append_many(["p", "bad tag", "span"]);
    assert!(matches!(result, Err(Error::InvalidTagName(_))));
    assert_eq!(ids(&parent), ["p"]);
}

#[test]
fn cannot_append_ancestor_into_descendant() {
    let page = Page::new();
    let outer = Html::new(&page, "div").expect("div");
    let inner = outer.append("section").expect("section");

    assert!(matches!(
        outer.append_to(&inner),
        Err(Error::HierarchyRequest { .. })
    ));
    assert!(matches!(
        outer.append(&outer),
        Err(Error::HierarchyRequest { .. })
    ));
}

#[test]
fn chained_build_of_a_fragment() {
    let page = Page::new();
    let card = Html::new(&page, "article").expect("article");
    card.class_on(["card"])
        .attr([("data-kind", Some("note"))])
        .append_to("body")
        .expect("body exists");
    card.append("h2").expect("h2").text("Title");
    card.append("p").expect("p").text("Body").class_on(["muted"]);

    let html = page.html();
    assert!(html.contains(
        r#"<article class="card" data-kind="note"><h2>Title</h2><p class="muted">Body</p></article>"#
    ));
}

#[test]
fn elements_from_another_page_are_rejected() {
    let page = Page::from_html(r#"<div id="host"></div>"#);
    let other = Page::from_html(r#"<p></p><p></p><span id="far">far</span>"#);
    let host = page.qs("#host").expect("valid").expect("host");
    let far = other.qs("#far").expect("valid").expect("far");
    let before = page.html();

    assert!(matches!(
        host.append(&far),
        Err(Error::WrongDocument { child }) if child == "span"
    ));
    assert!(matches!(
        host.prepend(far.elm()),
        Err(Error::WrongDocument { .. })
    ));
    assert!(matches!(
        far.append_to(&host),
        Err(Error::WrongDocument { .. })
    ));
    assert!(matches!(
        far.prepend_to_with(host.elm(), Resolution::Advisory),
        Err(Error::WrongDocument { .. })
    ));

    assert_eq!(page.html(), before);
    assert!(host.children().is_empty());
    assert!(far.is_attached());
    assert!(!page.is_attached(far.elm()));
}
