//! End-to-end pipeline tests over small in-memory projects.

use scandoc_analysis::model::{DeclarationKind, MemberKind, Project, SourceFile};
use scandoc_analysis::pipeline;
use scandoc_core::{PipelineError, ResolutionConfig, WarningKind};

fn project(files: &[(&str, &str)]) -> Project {
    Project {
        files: files
            .iter()
            .map(|(path, text)| SourceFile::new(*path, *text))
            .collect(),
        config: ResolutionConfig::default(),
    }
}

#[test]
fn colliding_names_get_stable_suffixes() {
    let files = [
        (
            "app/about/about.module.ts",
            "@NgModule({}) export class AboutModule {}",
        ),
        (
            "app/about2/about.module.ts",
            "@NgModule({}) export class AboutModule {}",
        ),
        (
            "app/about3/about.module.ts",
            "@NgModule({}) export class AboutModule {}",
        ),
    ];
    let first = pipeline::run(&project(&files)).unwrap();
    let second = pipeline::run(&project(&files)).unwrap();

    let names: Vec<_> = first
        .documents
        .iter()
        .map(|d| d.declaration.name.clone())
        .collect();
    assert_eq!(names, vec!["AboutModule", "AboutModule2", "AboutModule3"]);
    let names_again: Vec<_> = second
        .documents
        .iter()
        .map(|d| d.declaration.name.clone())
        .collect();
    assert_eq!(names, names_again);
}

#[test]
fn guard_listing_follows_provider_registration() {
    let graph = pipeline::run(&project(&[
        (
            "app/auth.guard.ts",
            r#"
@Injectable()
export class AuthGuard implements CanActivate {
    canActivate(): boolean { return true; }
}
"#,
        ),
        (
            "app/lone.guard.ts",
            r#"
export class LoneGuard implements CanDeactivate<unknown> {
    canDeactivate(): boolean { return true; }
}
"#,
        ),
        (
            "app/app.module.ts",
            "@NgModule({ providers: [AuthGuard] }) export class AppModule {}",
        ),
    ]))
    .unwrap();

    let guard_names: Vec<_> = graph
        .categories
        .guards
        .iter()
        .filter_map(|id| graph.document(*id))
        .map(|d| d.declaration.name.as_str())
        .collect();
    assert_eq!(guard_names, vec!["AuthGuard", "LoneGuard"]);

    let injectable_names: Vec<_> = graph
        .categories
        .injectables
        .iter()
        .filter_map(|id| graph.document(*id))
        .map(|d| d.declaration.name.as_str())
        .collect();
    assert_eq!(injectable_names, vec!["AuthGuard"]);
    assert!(graph.categories.classes.is_empty());
}

#[test]
fn inherited_members_point_back_to_their_ancestor() {
    let graph = pipeline::run(&project(&[(
        "app/components.ts",
        r#"
export class BaseComponent {
    shared: string = 'base';
}

@Component({ selector: 'app-leaf', template: '' })
export class LeafComponent extends BaseComponent {
    own: number = 1;
}
"#,
    )]))
    .unwrap();

    let leaf = graph
        .documents
        .iter()
        .find(|d| d.declaration.name == "LeafComponent")
        .unwrap();
    let base = graph
        .documents
        .iter()
        .find(|d| d.declaration.name == "BaseComponent")
        .unwrap();
    let inherited = leaf
        .resolved
        .members
        .iter()
        .find(|m| m.name == "shared")
        .unwrap();
    assert_eq!(inherited.defined_in, Some(base.id));
    assert_eq!(
        inherited.line,
        base.declaration
            .members
            .iter()
            .find(|m| m.name == "shared")
            .unwrap()
            .line
    );
}

#[test]
fn decorator_and_functional_bindings_produce_identical_records() {
    // Same member shape on the same line in two files; only the binding
    // syntax differs.
    let graph = pipeline::run(&project(&[
        (
            "app/a.component.ts",
            r#"@Component({ selector: 'app-a', template: '' })
export class AComponent {
    /** The label. */
    @Input() label: string = 'hi';
}
"#,
        ),
        (
            "app/b.component.ts",
            r#"@Component({ selector: 'app-b', template: '' })
export class BComponent {
    /** The label. */
    label = input<string>('hi');
}
"#,
        ),
    ]))
    .unwrap();

    let member_json = |name: &str| {
        let doc = graph
            .documents
            .iter()
            .find(|d| d.declaration.name == name)
            .unwrap();
        serde_json::to_string(&doc.declaration.members[0]).unwrap()
    };
    let a = member_json("AComponent");
    let b = member_json("BComponent");
    assert_eq!(a, b);
    assert!(a.contains("InputBinding"));
}

#[test]
fn member_types_print_back_to_their_source_form() {
    let graph = pipeline::run(&project(&[(
        "app/todo.store.ts",
        r#"
@Injectable()
export class TodoStore {
    todos: Observable<Todo[]>;
    filter: 'all' | 'active' | 'done' = 'all';
}
"#,
    )]))
    .unwrap();

    let store = &graph.documents[0].declaration;
    for member in &store.members {
        let type_expr = member.type_expr.as_ref().unwrap();
        assert_eq!(&type_expr.to_string(), member.type_raw.as_ref().unwrap());
    }
}

#[test]
fn builtin_member_types_get_global_doc_links() {
    let graph = pipeline::run(&project(&[(
        "app/todo.ts",
        r#"
export class Todo {
    title: string;
    due: Date;
}
"#,
    )]))
    .unwrap();

    let todo = &graph.documents[0];
    let string_link = todo.resolved.type_links.get("string").unwrap();
    assert!(string_link.contains("Global_Objects/string"));
    assert!(todo.resolved.type_links.contains_key("Date"));
}

#[test]
fn unresolved_link_stays_verbatim_and_warns() {
    let graph = pipeline::run(&project(&[(
        "app/todo.ts",
        r#"
/**
 * See {@link DoesNotExist} for background.
 */
export class Todo {}
"#,
    )]))
    .unwrap();

    let todo = &graph.documents[0];
    assert_eq!(
        todo.resolved.doc.as_deref(),
        Some("See {@link DoesNotExist} for background.")
    );
    assert!(graph
        .warnings
        .iter()
        .any(|w| w.kind == WarningKind::UnresolvedLink && w.message.contains("DoesNotExist")));
    let unresolved = graph
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::UnresolvedLink)
        .count();
    assert_eq!(unresolved, 1);
}

#[test]
fn ambient_link_target_is_known_good() {
    let mut p = project(&[(
        "app/todo.store.ts",
        r#"
/**
 * Emits through an {@link Observable}.
 */
export class TodoStore {}
"#,
    )]);
    p.config.ambient_types = vec!["Observable".into()];
    let graph = pipeline::run(&p).unwrap();

    let store = &graph.documents[0];
    assert_eq!(
        store.resolved.doc.as_deref(),
        Some("Emits through an {@link Observable}.")
    );
    assert!(!graph
        .warnings
        .iter()
        .any(|w| w.kind == WarningKind::UnresolvedLink));
}

#[test]
fn link_between_documents_rewrites_to_page_target() {
    let graph = pipeline::run(&project(&[(
        "app/todo.ts",
        r#"
/**
 * Holds one {@link Todo|todo item}.
 */
export class TodoHolder {}

export class Todo {
    completed: boolean;
}
"#,
    )]))
    .unwrap();

    let holder = graph
        .documents
        .iter()
        .find(|d| d.declaration.name == "TodoHolder")
        .unwrap();
    assert_eq!(
        holder.resolved.doc.as_deref(),
        Some("Holds one [todo item](classes/Todo).")
    );
    assert_eq!(holder.resolved.links.len(), 1);
}

#[test]
fn exact_name_match_ranks_first() {
    let graph = pipeline::run(&project(&[
        ("app/todo.ts", "export class Todo {}"),
        (
            "app/todo.component.ts",
            "@Component({ selector: 'app-todo', template: '' }) export class TodoComponent {}",
        ),
    ]))
    .unwrap();

    let hits = graph.search.query("todo");
    assert_eq!(hits[0].name, "Todo");
    assert_eq!(hits[1].name, "TodoComponent");
}

#[test]
fn cyclic_interface_hierarchy_is_fatal() {
    let err = pipeline::run(&project(&[(
        "app/cycle.ts",
        r#"
export interface First extends Second { a: string; }
export interface Second extends First { b: string; }
"#,
    )]))
    .unwrap_err();

    let PipelineError::Resolve(resolve) = err else {
        panic!("expected a resolution error");
    };
    let message = resolve.to_string();
    assert!(message.contains("'First'") || message.contains("'Second'"), "{message}");
    assert!(message.contains("Cyclic inheritance"), "{message}");
}

#[test]
fn invalid_config_fails_before_any_extraction() {
    let mut project = project(&[("app/todo.ts", "export class Todo {}")]);
    project.config.search_content_threshold = 0;
    assert!(matches!(
        pipeline::run(&project),
        Err(PipelineError::Config(_))
    ));
}

#[test]
fn small_app_assembles_all_categories() {
    let graph = pipeline::run(&project(&[
        (
            "app/app.module.ts",
            r#"
@NgModule({
    imports: [BrowserModule, RouterModule.forRoot(routes)],
    declarations: [AppComponent],
    providers: [TodoStore],
    bootstrap: [AppComponent],
})
export class AppModule {}
"#,
        ),
        (
            "app/app.component.ts",
            r#"
@Component({ selector: 'app-root', templateUrl: './app.component.html' })
export class AppComponent {
    title = 'todomvc';
}
"#,
        ),
        (
            "app/todo.store.ts",
            "@Injectable() export class TodoStore {}",
        ),
        (
            "app/first-upper.pipe.ts",
            "@Pipe({ name: 'firstUpper', pure: false }) export class FirstUpperPipe {}",
        ),
        (
            "app/app.routes.ts",
            "export const routes: Routes = [{ path: '', component: AppComponent }];",
        ),
        ("app/direction.ts", "export enum Direction { Up, Down }"),
        (
            "app/util.ts",
            "export function clamp(value: number, max: number): number { return value; }",
        ),
        ("app/chart-change.ts", "export type ChartChange = 'init' | 'update';"),
    ]))
    .unwrap();

    assert_eq!(graph.categories.modules.len(), 1);
    assert_eq!(graph.categories.components.len(), 1);
    assert_eq!(graph.categories.injectables.len(), 1);
    assert_eq!(graph.categories.pipes.len(), 1);
    assert_eq!(graph.routes.len(), 1);
    assert_eq!(graph.categories.miscellaneous.enumerations.len(), 1);
    assert_eq!(graph.categories.miscellaneous.functions.len(), 1);
    assert_eq!(graph.categories.miscellaneous.type_aliases.len(), 1);

    let module = &graph.categories.modules[0];
    assert_eq!(module.imports[0].name, "BrowserModule");
    assert_eq!(module.imports[1].name, "RouterModule");
    let app_component = graph
        .documents
        .iter()
        .find(|d| d.declaration.name == "AppComponent")
        .unwrap();
    assert_eq!(module.bootstrap[0].entity, Some(app_component.id));

    // Enum members survive assembly.
    let direction = graph
        .documents
        .iter()
        .find(|d| d.declaration.name == "Direction")
        .unwrap();
    assert_eq!(direction.declaration.members.len(), 2);
    assert_eq!(direction.declaration.members[0].kind, MemberKind::Property);
    assert_eq!(direction.declaration.kind, DeclarationKind::Enum);
}
