//! Declaration extraction: one source file in, declaration records out.
//!
//! Extraction is per-file and shares nothing, so the pipeline can fan out
//! across files freely. A file that cannot be parsed at all degrades to a
//! warning; individual broken declarations are skipped with a warning while
//! the rest of the file still extracts.

pub mod declarations;
pub mod members;
pub mod parser;
pub mod walk;

use scandoc_core::{ResolutionConfig, Warning, WarningKind};

use crate::model::{Declaration, SourceFile};

/// Result of extracting one file.
#[derive(Debug, Default)]
pub struct FileExtraction {
    pub declarations: Vec<Declaration>,
    pub warnings: Vec<Warning>,
}

pub fn extract_file(file: &SourceFile, config: &ResolutionConfig) -> FileExtraction {
    match parser::parse_source(&file.path, &file.text) {
        Some(tree) => declarations::extract(&tree, file, config),
        None => FileExtraction {
            declarations: Vec::new(),
            warnings: vec![Warning::new(
                WarningKind::UnparseableFile,
                Some(&file.path),
                "file could not be parsed",
            )],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeclarationKind, MemberKind, Metadata, Visibility};

    fn extract_source(source: &str) -> FileExtraction {
        let file = SourceFile::new("test.ts", source);
        extract_file(&file, &ResolutionConfig::default())
    }

    #[test]
    fn extracts_component_with_metadata() {
        let out = extract_source(
            r#"
/**
 * The about page.
 */
@Component({
    selector: 'app-about',
    templateUrl: './about.component.html',
    styleUrls: ['./about.component.scss'],
    standalone: true,
})
export class AboutComponent {}
"#,
        );
        assert_eq!(out.declarations.len(), 1);
        let decl = &out.declarations[0];
        assert_eq!(decl.kind, DeclarationKind::Component);
        assert_eq!(decl.name, "AboutComponent");
        assert_eq!(decl.doc.as_deref(), Some("The about page."));
        assert!(decl.standalone);
        let Metadata::Component(meta) = &decl.metadata else {
            panic!("expected component metadata");
        };
        assert_eq!(meta.selector.as_deref(), Some("app-about"));
        assert_eq!(meta.style_urls, vec!["./about.component.scss"]);
    }

    #[test]
    fn module_spread_of_same_file_constant_is_spliced() {
        let out = extract_source(
            r#"
const SHARED = { imports: [CommonModule] };

@NgModule({
    ...SHARED,
    declarations: [AboutComponent],
    bootstrap: [AppComponent],
})
export class AppModule {}
"#,
        );
        let decl = &out.declarations[0];
        let Metadata::Module(meta) = &decl.metadata else {
            panic!("expected module metadata");
        };
        assert_eq!(meta.imports, vec!["CommonModule"]);
        assert_eq!(meta.declarations, vec!["AboutComponent"]);
        assert_eq!(meta.bootstrap, vec!["AppComponent"]);
    }

    #[test]
    fn provider_objects_reduce_to_identifiers() {
        let out = extract_source(
            r#"
@NgModule({
    providers: [
        TodoStore,
        { provide: 'storage', useClass: LocalStorageBackend },
        { provide: APP_BASE_HREF, useValue: '/' },
        { provide: ErrorHandler, useExisting: GlobalErrorHandler },
        { useClass: NoopStrategy },
    ],
})
export class AppModule {}
"#,
        );
        let Metadata::Module(meta) = &out.declarations[0].metadata else {
            panic!("expected module metadata");
        };
        assert_eq!(
            meta.providers,
            vec![
                "TodoStore",
                "LocalStorageBackend",
                "/",
                "GlobalErrorHandler",
                "NoopStrategy"
            ]
        );
    }

    #[test]
    fn guard_capability_beats_injectable() {
        let out = extract_source(
            r#"
@Injectable()
export class AuthGuard implements CanActivate {
    canActivate(): boolean { return true; }
}
"#,
        );
        let decl = &out.declarations[0];
        assert_eq!(decl.kind, DeclarationKind::Guard);
        assert!(decl.is_guard);
    }

    #[test]
    fn generic_guard_interface_is_recognized() {
        let out = extract_source(
            "export class HeroResolver implements Resolve<Hero> {}",
        );
        assert_eq!(out.declarations[0].kind, DeclarationKind::Guard);
    }

    #[test]
    fn accessor_pair_merges_into_one_member() {
        let out = extract_source(
            r#"
export class Todo {
    private _title: string;
    /** Getter of title */
    get title(): string { return this._title; }
    /** Setter of title */
    set title(value: string) { this._title = value; }
}
"#,
        );
        let members = &out.declarations[0].members;
        let accessors: Vec<_> = members
            .iter()
            .filter(|m| m.kind == MemberKind::Accessor)
            .collect();
        assert_eq!(accessors.len(), 1);
        assert_eq!(accessors[0].name, "title");
        assert_eq!(accessors[0].type_raw.as_deref(), Some("string"));
        assert_eq!(
            accessors[0].doc.as_deref(),
            Some("Getter of title\n\nSetter of title")
        );
    }

    #[test]
    fn ecmascript_private_is_distinct_from_private_modifier() {
        let out = extract_source(
            r#"
export class Counter {
    #internal = 0;
    private shadow = 1;
}
"#,
        );
        let members = &out.declarations[0].members;
        assert_eq!(members[0].visibility, Visibility::EcmascriptPrivate);
        assert_eq!(members[1].visibility, Visibility::Private);
    }

    #[test]
    fn host_listener_and_binding_collect_in_order() {
        let out = extract_source(
            r#"
@Directive({
    selector: '[highlight]',
    host: { '(click)': 'onClick()' },
})
export class HighlightDirective {
    @HostBinding('style.color') color = 'red';
    @HostListener('mouseup', ['$event.clientX'])
    onMouseup(x: number): void {}
}
"#,
        );
        let decl = &out.declarations[0];
        let keys: Vec<_> = decl.host_bindings.iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, vec!["click", "style.color", "mouseup"]);
        assert_eq!(decl.host_bindings[2].expression, "onMouseup($event.clientX)");
    }

    #[test]
    fn routes_variable_becomes_route_declaration() {
        let out = extract_source(
            "const routes: Routes = [{ path: '', component: HomeComponent }];",
        );
        let decl = &out.declarations[0];
        assert_eq!(decl.kind, DeclarationKind::Route);
        let Metadata::Route(info) = &decl.metadata else {
            panic!("expected route metadata");
        };
        assert!(info.raw.contains("HomeComponent"));
    }

    #[test]
    fn namespace_declarations_are_hoisted() {
        let out = extract_source(
            r#"
namespace Tools {
    export interface Options { verbose: boolean; }
}
"#,
        );
        assert_eq!(out.declarations.len(), 1);
        assert_eq!(out.declarations[0].kind, DeclarationKind::Interface);
        assert_eq!(out.declarations[0].name, "Options");
    }

    #[test]
    fn nested_namespaces_hoist_recursively() {
        let out = extract_source(
            r#"
namespace Outer {
    export namespace Inner {
        export class Deep {}
    }
    export enum Mode { On, Off }
}
"#,
        );
        let names: Vec<_> = out.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Deep", "Mode"]);
    }

    #[test]
    fn broken_declaration_is_skipped_with_warning() {
        let out = extract_source(
            r#"
export class { broken
export class Good {}
"#,
        );
        assert!(out
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::SkippedDeclaration));
    }
}
