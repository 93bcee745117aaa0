//! Browser-hosted engine module.
//!
//! The engine ships as an Emscripten-style script that defines a global
//! factory (`DesignStudioModule` by default). Calling the factory resolves to
//! an exports object carrying the `_engine_*` functions.

use std::future::Future;

use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Document;

use crate::binding::BindingError;
use crate::coords::{CanvasSize, ColorRgba, Rect, Vec2};

use super::{EngineHandle, EngineModule, ModuleLoader, RectRef};

/// Exports object of an instantiated engine module.
pub struct WebModule {
    exports: JsValue,
}

impl WebModule {
    pub fn from_exports(exports: JsValue) -> Self {
        Self { exports }
    }

    /// Calls export `name`. Missing exports and thrown exceptions are logged and
    /// yield `undefined`.
    fn call(&self, name: &str, args: &[JsValue]) -> JsValue {
        let func = Reflect::get(&self.exports, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());

        let Some(func) = func else {
            log::error!("engine module has no export `{name}`");
            return JsValue::UNDEFINED;
        };

        let argv: Array = args.iter().collect();
        func.apply(&self.exports, &argv).unwrap_or_else(|e| {
            log::error!("`{name}` threw: {e:?}");
            JsValue::UNDEFINED
        })
    }

    fn call_on(&self, name: &str, handle: EngineHandle, rest: &[f64]) -> JsValue {
        let mut args = Vec::with_capacity(rest.len() + 1);
        args.push(JsValue::from_f64(handle.raw() as f64));
        args.extend(rest.iter().map(|v| JsValue::from_f64(*v)));
        self.call(name, &args)
    }
}

impl EngineModule for WebModule {
    fn create(&self) -> Option<EngineHandle> {
        let ptr = self.call("_engine_create", &[]).as_f64()?;
        if ptr < 1.0 {
            return None;
        }
        EngineHandle::from_raw(ptr as u64)
    }

    fn destroy(&self, handle: EngineHandle) {
        self.call_on("_engine_destroy", handle, &[]);
    }

    fn initialize(&self, handle: EngineHandle, size: CanvasSize) -> bool {
        let ok = self.call_on(
            "_engine_initialize",
            handle,
            &[size.width as f64, size.height as f64],
        );
        ok.as_bool().unwrap_or_else(|| ok.as_f64().is_some_and(|v| v != 0.0))
    }

    fn set_canvas_size(&self, handle: EngineHandle, size: CanvasSize) {
        self.call_on(
            "_engine_set_canvas_size",
            handle,
            &[size.width as f64, size.height as f64],
        );
    }

    fn render(&self, handle: EngineHandle) {
        self.call_on("_engine_render", handle, &[]);
    }

    fn mouse_down(&self, handle: EngineHandle, pos: Vec2) {
        self.call_on("_engine_mouse_down", handle, &[pos.x as f64, pos.y as f64]);
    }

    fn mouse_move(&self, handle: EngineHandle, pos: Vec2) {
        self.call_on("_engine_mouse_move", handle, &[pos.x as f64, pos.y as f64]);
    }

    fn mouse_up(&self, handle: EngineHandle, pos: Vec2) {
        self.call_on("_engine_mouse_up", handle, &[pos.x as f64, pos.y as f64]);
    }

    fn add_rectangle(&self, handle: EngineHandle, rect: Rect) -> Option<RectRef> {
        let index = self
            .call_on(
                "_engine_add_rectangle",
                handle,
                &[
                    rect.origin.x as f64,
                    rect.origin.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                ],
            )
            .as_f64()?;

        (index >= 0.0 && index <= u32::MAX as f64).then(|| RectRef::new(index as u32))
    }

    fn set_rectangle_color(&self, handle: EngineHandle, index: RectRef, color: ColorRgba) {
        self.call_on(
            "_engine_set_rectangle_color",
            handle,
            &[
                index.index() as f64,
                color.r as f64,
                color.g as f64,
                color.b as f64,
                color.a as f64,
            ],
        );
    }

    fn clear_shapes(&self, handle: EngineHandle) {
        self.call_on("_engine_clear_shapes", handle, &[]);
    }
}

/// Fetches the engine script and instantiates the module.
#[derive(Debug, Clone)]
pub struct WebModuleLoader {
    /// URL of the script defining the factory; injected only if the factory is missing.
    pub script_url: String,
    /// Name of the global factory function.
    pub factory: String,
}

impl Default for WebModuleLoader {
    fn default() -> Self {
        Self {
            script_url: "/DesignStudioModule.js".to_string(),
            factory: "DesignStudioModule".to_string(),
        }
    }
}

impl WebModuleLoader {
    async fn instantiate(&self) -> Result<WebModule, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let global: JsValue = window.clone().into();
        let factory_key = JsValue::from_str(&self.factory);

        if Reflect::get(&global, &factory_key)?.is_undefined() {
            let document = window
                .document()
                .ok_or_else(|| JsValue::from_str("no document"))?;
            inject_script(&document, &self.script_url).await?;
        }

        let factory: Function = Reflect::get(&global, &factory_key)?.dyn_into()?;
        let pending = factory.call0(&JsValue::NULL)?;
        let exports = JsFuture::from(Promise::resolve(&pending)).await?;

        Ok(WebModule::from_exports(exports))
    }
}

impl ModuleLoader for WebModuleLoader {
    type Module = WebModule;

    fn load(&mut self) -> impl Future<Output = Result<WebModule, BindingError>> {
        async move {
            self.instantiate()
                .await
                .map_err(|e| BindingError::ModuleLoad(format!("{e:?}")))
        }
    }
}

/// Appends a `<script src=url>` to the document head and waits for it to load.
async fn inject_script(document: &Document, url: &str) -> Result<(), JsValue> {
    let script = document.create_element("script")?;
    script.set_attribute("src", url)?;

    let loaded = Promise::new(&mut |resolve, reject| {
        let onload = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("failed to load engine script"));
        });
        let _ = Reflect::set(script.as_ref(), &JsValue::from_str("onload"), &onload);
        let _ = Reflect::set(script.as_ref(), &JsValue::from_str("onerror"), &onerror);
    });

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no head"))?;
    head.append_child(&script)?;

    JsFuture::from(loaded).await?;
    Ok(())
}
